use chromiumoxide::Browser;
use tracing::{error, warn};

use crate::browser;
use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::JsExecutor;
use crate::page::ElementUiPage;
use crate::scoring::{strategy_from_config, ScoringStrategy};
use crate::utils::logging::{log_startup, print_final_stats};
use crate::utils::RunRecord;
use crate::workflow::{EvaluationDriver, RunSummary};

/// 应用主结构
pub struct App {
    config: Config,
    _browser: Browser,
    driver: EvaluationDriver<ElementUiPage, Box<dyn ScoringStrategy>>,
}

impl App {
    /// 初始化应用：写记录文件标题、连接浏览器、组装驱动器
    pub async fn initialize(config: Config) -> AppResult<Self> {
        let record = RunRecord::new(&config.output_log_file);
        if let Err(e) = record.start().await {
            warn!("⚠️ 无法初始化记录文件: {}", e);
        }

        log_startup(&config);

        let (browser, page) = browser::connect_to_browser_and_page(
            config.browser_debug_port,
            config.target_url.as_deref(),
            config.target_title.as_deref(),
        )
        .await?;

        let page = ElementUiPage::new(JsExecutor::new(page));
        let driver = EvaluationDriver::new(page, strategy_from_config(&config), config.driver_config())
            .with_record(record);

        Ok(Self {
            config,
            _browser: browser,
            driver,
        })
    }

    /// 运行评价循环，Ctrl-C 时提前结束
    pub async fn run(&mut self) -> AppResult<RunSummary> {
        let shutdown = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("无法监听停止信号: {}", e);
                std::future::pending::<()>().await;
            }
        };

        let summary = self.driver.run_until(shutdown).await?;
        print_final_stats(&summary, &self.config.output_log_file);
        Ok(summary)
    }
}
