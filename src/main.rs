use std::path::PathBuf;

use anyhow::{Context, Result};
use waste_agents::utils::logging;
use waste_agents::{App, Config};

const USAGE: &str = "用法: waste_agents <图片路径> <邮箱>";

#[tokio::main]
async fn main() -> Result<()> {
    // 加载配置
    let config = Config::load().context("加载配置失败")?;

    // 初始化日志
    logging::init(config.verbose_logging);

    let mut args = std::env::args().skip(1);
    let image_path = args.next().map(PathBuf::from).context(USAGE)?;
    let user_id = args.next().unwrap_or_default();

    // 初始化并运行应用
    let app = App::initialize(&config);
    let report = app.process_upload(&image_path, &user_id).await?;

    println!("{}", report.render());

    Ok(())
}
