use chromiumoxide::{Browser, Page};
use futures::StreamExt;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info, warn};

use crate::error::{AppError, AppResult, BrowserError};

/// 连接到已开启远程调试的浏览器，并找到评教页面
///
/// 依次尝试：URL 包含 `target_url` 的标签页 → 标题包含 `target_title` 的标签页
/// → 新开标签页导航到 `target_url` → 第一个已有标签页
pub async fn connect_to_browser_and_page(
    port: u16,
    target_url: Option<&str>,
    target_title: Option<&str>,
) -> AppResult<(Browser, Page)> {
    let browser_url = format!("http://localhost:{}", port);
    info!("正在连接到浏览器: {}", browser_url);
    debug!("目标 URL: {:?}, 目标标题: {:?}", target_url, target_title);

    let (browser, mut handler) = Browser::connect(&browser_url).await.map_err(|e| {
        error!("连接浏览器失败: {}", e);
        AppError::browser_connection_failed(port, e)
    })?;
    debug!("浏览器连接成功");

    // 在后台处理浏览器事件
    tokio::spawn(async move {
        while let Some(h) = handler.next().await {
            if h.is_err() {
                break;
            }
        }
    });

    // 等待浏览器把已有标签页同步过来
    sleep(Duration::from_millis(300)).await;

    let pages = browser.pages().await?;
    debug!("获取到 {} 个页面", pages.len());

    for p in pages.iter() {
        let url = p.url().await.ok().flatten().unwrap_or_default();
        let title = p.get_title().await.ok().flatten().unwrap_or_default();
        debug!("检查页面: {} ({})", title, url);

        if matches_target(&url, &title, target_url, target_title) {
            info!("✓ 找到评教页面: {}", if title.is_empty() { &url } else { &title });
            p.bring_to_front().await?;
            return Ok((browser, p.clone()));
        }
    }

    if let Some(url) = target_url {
        debug!("未找到匹配的页面，新开标签页并导航到: {}", url);
        let page = browser.new_page("about:blank").await.map_err(|e| {
            error!("创建新页面失败: {}", e);
            BrowserError::PageCreationFailed { source: e }
        })?;
        page.goto(url).await.map_err(|e| {
            error!("导航到 {} 失败: {}", url, e);
            BrowserError::NavigationFailed {
                url: url.to_string(),
                source: e,
            }
        })?;
        info!("已导航到: {}（如需登录请在浏览器中完成）", url);
        return Ok((browser, page));
    }

    match pages.into_iter().next() {
        Some(page) => {
            warn!("⚠️ 未指定目标页面，使用浏览器中的第一个标签页");
            Ok((browser, page))
        }
        None => {
            let page = browser
                .new_page("about:blank")
                .await
                .map_err(|e| BrowserError::PageCreationFailed { source: e })?;
            warn!("⚠️ 浏览器中没有任何标签页，已创建空白页");
            Ok((browser, page))
        }
    }
}

/// 判断标签页是否为目标页面
fn matches_target(
    url: &str,
    title: &str,
    target_url: Option<&str>,
    target_title: Option<&str>,
) -> bool {
    let url_hit = target_url.is_some_and(|t| !t.is_empty() && url.contains(t));
    let title_hit = target_title.is_some_and(|t| !t.is_empty() && title.contains(t));
    url_hit || title_hit
}
