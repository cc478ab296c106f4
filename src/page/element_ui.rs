//! 基于 Element UI 结构的评教页面实现
//!
//! 所有操作都是在页面里执行一小段脚本，结果以 JSON 带回

use async_trait::async_trait;
use tracing::debug;

use super::selectors::*;
use super::EvaluationPage;
use crate::error::AppResult;
use crate::infrastructure::JsExecutor;
use crate::models::{InputWrite, RatingInput, TableRow};

/// 找到输入框后给它打上的标记属性，后续写值时按它定位
const INPUT_MARK_ATTR: &str = "data-eval-idx";

const LIST_ROWS_JS: &str = r#"(rowSel, statusSel, nameSel, actionSel) =>
    Array.from(document.querySelectorAll(rowSel)).map((r, i) => ({
        index: i,
        name: (r.querySelector(nameSel)?.innerText || "").trim(),
        status: (r.querySelector(statusSel)?.innerText || "").trim(),
        hasAction: !!r.querySelector(actionSel),
    }))"#;

const OPEN_REVIEW_JS: &str = r#"(rowSel, actionSel, index) => {
    const row = document.querySelectorAll(rowSel)[index];
    const btn = row ? row.querySelector(actionSel) : null;
    if (!btn) return false;
    btn.click();
    return true;
}"#;

const FIND_INPUTS_JS: &str = r#"(inputSel, itemSel, labelSel, markAttr) => {
    document.querySelectorAll(`[${markAttr}]`).forEach(e => e.removeAttribute(markAttr));
    return Array.from(document.querySelectorAll(inputSel))
        .filter(i => {
            const item = i.closest(itemSel);
            return !i.readOnly && item && item.querySelector(labelSel);
        })
        .map((el, i) => {
            el.setAttribute(markAttr, String(i));
            const label = el.closest(itemSel).querySelector(labelSel);
            return { index: i, label: (label?.innerText || "").trim() };
        });
}"#;

const SET_VALUE_JS: &str = r#"(dialogSel, markAttr, index, value) => {
    const el = document.querySelector(`${dialogSel} input[${markAttr}="${index}"]`);
    if (!el) return "missing";
    if (el.readOnly) return "read_only";
    el.value = String(value);
    el.dispatchEvent(new Event("input", { bubbles: true }));
    el.dispatchEvent(new Event("change", { bubbles: true }));
    return "applied";
}"#;

const CLICK_JS: &str = r#"(sel) => {
    const el = document.querySelector(sel);
    if (!el) return false;
    el.click();
    return true;
}"#;

const DIALOG_VISIBLE_JS: &str = r#"(dialogSel) => {
    const d = document.querySelector(dialogSel);
    return !!d && getComputedStyle(d).display !== "none";
}"#;

/// Element UI 评教页面
pub struct ElementUiPage {
    executor: JsExecutor,
}

impl ElementUiPage {
    pub fn new(executor: JsExecutor) -> Self {
        Self { executor }
    }

    async fn click(&self, selector: &str) -> AppResult<bool> {
        let clicked: bool = self.executor.call(CLICK_JS, &[selector]).await?;
        debug!("点击 {} -> {}", selector, clicked);
        Ok(clicked)
    }
}

#[async_trait]
impl EvaluationPage for ElementUiPage {
    async fn list_rows(&self) -> AppResult<Vec<TableRow>> {
        self.executor
            .call(LIST_ROWS_JS, &[TABLE_ROW, ROW_STATUS, ROW_NAME, ROW_ACTION])
            .await
    }

    async fn open_review(&self, row: &TableRow) -> AppResult<bool> {
        self.executor
            .call(OPEN_REVIEW_JS, &(TABLE_ROW, ROW_ACTION, row.index))
            .await
    }

    async fn find_rating_inputs(&self) -> AppResult<Vec<RatingInput>> {
        self.executor
            .call(
                FIND_INPUTS_JS,
                &[DIALOG_INPUT, RATING_ITEM, RATING_LABEL, INPUT_MARK_ATTR],
            )
            .await
    }

    async fn set_rating_value(&self, input: &RatingInput, value: u8) -> AppResult<InputWrite> {
        self.executor
            .call(SET_VALUE_JS, &(DIALOG, INPUT_MARK_ATTR, input.index, value))
            .await
    }

    async fn submit(&self) -> AppResult<bool> {
        self.click(SUBMIT_BUTTON).await
    }

    async fn dismiss(&self) -> AppResult<bool> {
        self.click(CLOSE_BUTTON).await
    }

    async fn dialog_visible(&self) -> AppResult<bool> {
        self.executor.call(DIALOG_VISIBLE_JS, &[DIALOG]).await
    }
}
