//! 日志工具模块
//!
//! 控制台日志初始化和启动 / 结束时的汇总输出

use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::RunSummary;

/// 初始化控制台日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose` 选择 debug / info
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    // 测试中可能被重复调用
    if tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()
        .is_err()
    {
        debug!("日志已初始化，沿用已有的订阅者");
    }
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("🚀 启动批量评价");
    info!("🔌 浏览器调试端口: {}", config.browser_debug_port);
    info!(
        "⏱ 查找间隔 {}ms / 输入框超时 {}ms / 提交后等待 {}ms",
        config.poll_interval_ms, config.input_timeout_ms, config.post_action_cooldown_ms
    );
    match config.max_attempts_per_row {
        Some(limit) => info!("🔁 每位老师最多尝试 {} 次", limit),
        None => info!("🔁 不限制每位老师的尝试次数"),
    }
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
pub fn print_final_stats(summary: &RunSummary, log_file_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 评价完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    info!("✅ 已提交: {}", summary.submitted);
    info!(
        "⚠️ 跳过: {} (无评价按钮 {} / 无输入框 {} / 无提交按钮 {} / 出错 {})",
        summary.skipped(),
        summary.missing_action,
        summary.no_inputs,
        summary.missing_submit,
        summary.failed
    );
    if !summary.abandoned.is_empty() {
        info!("❌ 已放弃: {}", summary.abandoned.join("、"));
    }
    if summary.interrupted {
        info!("⏹ 运行被中断");
    }
    info!("{}", "=".repeat(60));
    info!("\n记录已保存至: {}", log_file_path);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_init_keeps_first_subscriber() {
        init(false);
        init(true);
        print_final_stats(&RunSummary::default(), "evaluate_log.txt");
    }
}
