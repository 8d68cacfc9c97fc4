//! 日志工具模块
//!
//! 提供日志初始化和输出的辅助函数

use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::workflow::{RunCtx, RunReport};

/// 初始化日志
///
/// 优先使用 `RUST_LOG`，否则按 `verbose_logging` 选择 debug / info。
/// 重复调用不会报错。
pub fn init(verbose_logging: bool) {
    let default_level = if verbose_logging { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
pub fn log_startup(config: &Config) {
    info!("{}", "=".repeat(60));
    info!("♻ 程序启动 - 多 Agent 垃圾处理模式");
    info!("🤖 模型: {}", config.llm_model_name);
    info!(
        "📮 通知: {}",
        if config.notify_webhook_url.is_empty() {
            "未配置"
        } else {
            config.notify_webhook_url.as_str()
        }
    );
    info!("{}", "=".repeat(60));
}

/// 打印单次运行的统计信息
pub fn log_run_summary(ctx: &RunCtx, report: &RunReport) {
    info!("\n{}", "=".repeat(60));
    info!("📊 运行完成统计 {}", ctx);
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("{}", "=".repeat(60));
    match report.category {
        Some(category) => info!("🏷  类别: {}", category.display_name()),
        None => info!("🏷  类别: -"),
    }
    match report.outcome.honor_score() {
        Some(score) => info!("🏅 荣誉积分: {}", score),
        None => info!("🏅 荣誉积分: -"),
    }
    info!("📌 结果: {}", report.outcome.summary());
    info!("{}", "=".repeat(60));
}

/// 截断长文本用于日志显示
///
/// # 参数
/// - `text`: 原始文本
/// - `max_len`: 最大字符数
///
/// # 返回
/// 返回截断后的文本
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}
