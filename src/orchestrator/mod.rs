//! 编排层
//!
//! 持有浏览器资源，组装页面适配器、打分策略和驱动器，输出全局统计
//!
//! ```text
//! App (Browser + 配置)
//!     ↓
//! workflow::EvaluationDriver (逐行评价)
//!     ↓
//! page::ElementUiPage / scoring (能力与策略)
//!     ↓
//! infrastructure::JsExecutor (唯一的 Page 持有者)
//! ```

pub mod app;

pub use app::App;
