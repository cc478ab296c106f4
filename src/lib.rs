//! # Teacher Eval
//!
//! 通过浏览器远程调试协议，自动完成网页评教表单的填写与提交
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `browser/` - 连接浏览器、找到评教标签页
//! - `JsExecutor` - 唯一的 page owner，提供执行脚本的能力
//!
//! ### ② 页面适配层（Page）
//! - `EvaluationPage` - 驱动器能用的全部页面能力
//! - `ElementUiPage` - 基于 Element UI 页面结构的实现，选择器集中在 `page::selectors`
//!
//! ### ③ 策略（Scoring / Polling）
//! - `ScoringStrategy` - 决定每个评分项打几分
//! - `polling` - 有界轮询，替代页面不存在的变更通知
//!
//! ### ④ 流程层（Workflow）
//! - `EvaluationDriver` - 逐行评价的主循环
//!
//! ### ⑤ 编排层（Orchestration）
//! - `App` - 加载配置、持有浏览器、运行驱动器并输出统计

pub mod browser;
pub mod config;
pub mod error;
pub mod infrastructure;
pub mod models;
pub mod orchestrator;
pub mod page;
pub mod polling;
pub mod scoring;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use browser::connect_to_browser_and_page;
pub use config::{Config, DriverConfig};
pub use error::{AppError, AppResult};
pub use infrastructure::JsExecutor;
pub use models::{InputWrite, RatingInput, ScoreSheet, TableRow};
pub use orchestrator::App;
pub use page::{ElementUiPage, EvaluationPage};
pub use scoring::{DockOneAtRandom, FullMarks, ScoringStrategy};
pub use workflow::{EvaluationDriver, RowOutcome, RunSummary};
