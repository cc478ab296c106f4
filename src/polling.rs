//! 有界轮询
//!
//! 页面没有变更通知，只能按固定间隔反复检查，直到条件满足或超时

use std::future::Future;
use std::time::Duration;

use tokio::time::{sleep, Instant};

use crate::error::AppResult;

/// 每隔 `interval` 调用一次 `probe`，直到返回 `Some` 或超过 `timeout`
///
/// 超时返回 `Ok(None)`；最后一次等待会被截短到截止时间，不会越过它。
/// `probe` 的错误直接向上传递。
pub async fn poll_until<T, F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> AppResult<Option<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<Option<T>>>,
{
    let deadline = Instant::now() + timeout;
    loop {
        if let Some(found) = probe().await? {
            return Ok(Some(found));
        }

        let now = Instant::now();
        if now >= deadline {
            return Ok(None);
        }
        sleep(interval.min(deadline - now)).await;
    }
}

/// 列表版本：空列表视为"还没出现"，超时返回空列表
pub async fn poll_for_items<T, F, Fut>(
    interval: Duration,
    timeout: Duration,
    mut probe: F,
) -> AppResult<Vec<T>>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = AppResult<Vec<T>>>,
{
    let found = poll_until(interval, timeout, || {
        let attempt = probe();
        async move {
            let items = attempt.await?;
            Ok((!items.is_empty()).then_some(items))
        }
    })
    .await?;

    Ok(found.unwrap_or_default())
}
