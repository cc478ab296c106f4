//! 页面适配层
//!
//! 驱动器只通过 [`EvaluationPage`] 操作评教页面，具体选择器集中在 [`selectors`]

pub mod element_ui;
pub mod selectors;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::{InputWrite, RatingInput, TableRow};

pub use element_ui::ElementUiPage;

/// 评教页面能提供的全部能力
///
/// 返回 `bool` 的操作表示目标控件是否存在并已点击
#[async_trait]
pub trait EvaluationPage: Send + Sync {
    /// 读取表格中的全部行（文档顺序）
    async fn list_rows(&self) -> AppResult<Vec<TableRow>>;

    /// 点击该行的评价按钮
    async fn open_review(&self, row: &TableRow) -> AppResult<bool>;

    /// 读取弹窗中当前可填写的评分输入框，单次检查、不等待
    async fn find_rating_inputs(&self) -> AppResult<Vec<RatingInput>>;

    /// 写入分数并触发 input、change 事件；只读输入框不会被改动
    async fn set_rating_value(&self, input: &RatingInput, value: u8) -> AppResult<InputWrite>;

    /// 点击弹窗的提交按钮
    async fn submit(&self) -> AppResult<bool>;

    /// 点击弹窗标题栏的关闭按钮
    async fn dismiss(&self) -> AppResult<bool>;

    /// 评价弹窗是否仍在显示
    async fn dialog_visible(&self) -> AppResult<bool>;

    /// 待评价的行，保持文档顺序
    async fn list_pending_rows(&self) -> AppResult<Vec<TableRow>> {
        Ok(self
            .list_rows()
            .await?
            .into_iter()
            .filter(TableRow::is_pending)
            .collect())
    }
}
