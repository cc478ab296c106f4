use anyhow::Result;
use teacher_eval::utils::logging;
use teacher_eval::{App, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load()?;

    // 初始化日志
    logging::init(config.verbose_logging);

    // 初始化并运行应用
    let summary = App::initialize(config).await?.run().await?;

    if !summary.is_complete() {
        std::process::exit(1);
    }
    Ok(())
}
