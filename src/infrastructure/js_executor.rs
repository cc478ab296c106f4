//! JS 执行器 - 基础设施层
//!
//! 持有唯一的 page 资源，只暴露"在页面里执行脚本"的能力

use chromiumoxide::Page;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::trace;

use crate::error::AppResult;

/// JS 执行器
///
/// 职责：
/// - 持有唯一的 Page 资源
/// - 执行脚本并把结果反序列化为 Rust 类型
/// - 不认识表格、弹窗，不处理评教流程
pub struct JsExecutor {
    page: Page,
}

impl JsExecutor {
    pub fn new(page: Page) -> Self {
        Self { page }
    }

    /// 执行一段表达式并反序列化结果
    ///
    /// 表达式必须有返回值，`undefined` 会导致反序列化失败
    pub async fn eval_as<T: DeserializeOwned>(&self, js_code: impl Into<String>) -> AppResult<T> {
        let js_code = js_code.into();
        trace!("执行脚本: {}", js_code);
        let result = self.page.evaluate(js_code).await?;
        Ok(result.into_value()?)
    }

    /// 以 `(body)(args)` 的形式执行一个函数，参数经 JSON 序列化后内联
    ///
    /// `function_body` 形如 `(idx, value) => { ... }`
    pub async fn call<A, T>(&self, function_body: &str, args: &A) -> AppResult<T>
    where
        A: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.eval_as(invocation(function_body, args)?).await
    }
}

/// 生成带内联参数的调用表达式，参数为 JSON 数组时展开为多个实参
fn invocation<A: Serialize + ?Sized>(function_body: &str, args: &A) -> AppResult<String> {
    let value = serde_json::to_value(args)?;
    let rendered = match value {
        serde_json::Value::Array(items) => items
            .iter()
            .map(serde_json::Value::to_string)
            .collect::<Vec<_>>()
            .join(", "),
        other => other.to_string(),
    };
    Ok(format!("({})({})", function_body, rendered))
}
