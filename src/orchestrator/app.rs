//! 应用入口 - 编排层
//!
//! ## 职责
//!
//! 1. **输入校验**：没有邮箱时不开始流程
//! 2. **资源加载**：读取上传的图片
//! 3. **向下委托**：交给 `WasteFlow` 执行一次完整流程
//! 4. **统计输出**：记录本次运行的结果

use std::path::Path;

use tracing::warn;

use crate::config::Config;
use crate::error::AppResult;
use crate::infrastructure::ImageData;
use crate::services::{Generator, LlmService, Notifier, NotifyService};
use crate::utils::logging::{log_run_summary, log_startup};
use crate::workflow::{RunCtx, RunReport, WasteFlow};

/// 应用主结构
pub struct App<G = LlmService, N = NotifyService> {
    flow: WasteFlow<G, N>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: &Config) -> Self {
        log_startup(config);
        Self {
            flow: WasteFlow::new(config),
        }
    }
}

impl<G: Generator, N: Notifier> App<G, N> {
    pub fn with_flow(flow: WasteFlow<G, N>) -> Self {
        Self { flow }
    }

    /// 处理一次上传
    ///
    /// 邮箱为空时直接返回 `MissingUserId`，不读取图片。
    /// 图片读取失败作为错误返回；流程内部的失败都体现在 `RunReport` 中。
    pub async fn process_upload(&self, image_path: &Path, user_id: &str) -> AppResult<RunReport> {
        if user_id.trim().is_empty() {
            warn!("⚠️ 未提供邮箱，流程未开始");
            return Ok(RunReport::missing_user_id());
        }

        let image = ImageData::load(image_path).await?;
        let ctx = RunCtx::new(user_id);

        let report = self.flow.run(&ctx, &image).await;
        log_run_summary(&ctx, &report);

        Ok(report)
    }
}
