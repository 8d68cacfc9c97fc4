//! 垃圾处理流程 - 流程层
//!
//! 核心职责：定义"一张图片"的完整处理流程
//!
//! 流程顺序：
//! 1. 分类 Agent → 标准化类别
//! 2. 直接类别：物品识别 → 处理流程 → 回收报告 → 积分 → 通知
//! 3. 混合垃圾：分拣报告 → 聚合 → 路由计划 → 主要类别处理流程 → 回收报告 → 积分 → 通知
//! 4. unknown：上报原始回复，不通知

use tracing::{debug, error, info, warn};

use crate::analysis::{self, treatment_protocol};
use crate::config::Config;
use crate::error::{AppResult, NotifyError};
use crate::infrastructure::ImageData;
use crate::models::{ClassificationResult, WasteCategory};
use crate::services::{
    prompts, AgentRequest, AgentRole, Generator, LlmService, NotificationPayload, Notifier,
    NotifyService,
};
use crate::utils::logging::truncate_text;
use crate::workflow::run_ctx::RunCtx;
use crate::workflow::run_report::{ReportLog, RunOutcome, RunReport};

/// 混合垃圾通知中使用的类别标签
pub fn mixed_label(dominant: WasteCategory) -> String {
    format!("Mixed (Major: {})", dominant.display_name())
}

/// 垃圾处理流程
///
/// - 编排完整的处理流程
/// - 决定走哪条分支、何时评分、何时通知
/// - 只依赖生成和通知两个协作方
pub struct WasteFlow<G = LlmService, N = NotifyService> {
    generator: G,
    notifier: N,
    verbose_logging: bool,
}

impl WasteFlow {
    /// 使用真实的 LLM 和 webhook 服务创建流程
    pub fn new(config: &Config) -> Self {
        Self::with_collaborators(LlmService::new(config), NotifyService::new(config), config)
    }
}

impl<G: Generator, N: Notifier> WasteFlow<G, N> {
    pub fn with_collaborators(generator: G, notifier: N, config: &Config) -> Self {
        Self {
            generator,
            notifier,
            verbose_logging: config.verbose_logging,
        }
    }

    pub async fn run(&self, ctx: &RunCtx, image: &ImageData) -> RunReport {
        let mut log = ReportLog::default();

        info!("{} 🔍 分类 Agent 正在分析图片 {}...", ctx, image.name);
        let classification = self.classify(ctx, image, &mut log).await;
        let category = classification.category;
        info!("{} ✓ 分类结果: {}", ctx, category);

        log.header("1. Classifier Agent Report");
        log.markdown(format!("*Determined Category:* {}", category.tag().to_uppercase()));
        log.header("2. Automated Treatment Workflow");

        let outcome = match category {
            WasteCategory::Biodegradable
            | WasteCategory::NonBiodegradable
            | WasteCategory::EWaste => self.run_direct(ctx, image, category, &mut log).await,
            WasteCategory::Mixed => self.run_mixed(ctx, image, &mut log).await,
            WasteCategory::Unknown => {
                warn!("{} ⚠️ 无法确定垃圾类别", ctx);
                log.error(format!(
                    "Classifier Agent could not determine a waste category. Response: {}",
                    if classification.reasoning.is_empty() {
                        "(empty)"
                    } else {
                        classification.reasoning.as_str()
                    }
                ));
                RunOutcome::Unclassified {
                    raw_response: classification.reasoning,
                }
            }
        };

        info!("{} 结束: {}", ctx, outcome.summary());
        log.finish(category, outcome)
    }

    /// 分类；调用失败或返回空文本时按 unknown 处理
    async fn classify(&self, ctx: &RunCtx, image: &ImageData, log: &mut ReportLog) -> ClassificationResult {
        match self.ask(ctx, AgentRole::Classifier, prompts::classifier_prompt(), image).await {
            Ok(text) => analysis::classify_response(&text),
            Err(e) => {
                warn!("{} ⚠️ 分类 Agent 调用失败，按 unknown 处理: {}", ctx, e);
                log.warning(format!("Classifier Agent did not respond: {}", e));
                analysis::classify_response("")
            }
        }
    }

    /// 直接类别分支
    async fn run_direct(
        &self,
        ctx: &RunCtx,
        image: &ImageData,
        category: WasteCategory,
        log: &mut ReportLog,
    ) -> RunOutcome {
        log.subheader("A. Component Identification");
        log.info(format!(
            "Component Identification Agent is analyzing the {} waste...",
            category.tag()
        ));
        let component_report = match self
            .ask(ctx, AgentRole::ComponentIdentification, prompts::component_prompt(category), image)
            .await
        {
            Ok(text) => text,
            Err(e) => return self.abort(ctx, AgentRole::ComponentIdentification, e.to_string(), log),
        };
        log.markdown(component_report.clone());

        log.subheader("B. Automated Treatment Protocol");
        self.show_protocol(category, log);

        log.subheader("C. Recycling Agent Report (Final Step)");
        let recycling_report = match self.recycle(ctx, image, &component_report, log).await {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };
        log.markdown(recycling_report);

        let item_count = analysis::count_report_lines(&component_report);
        let honor_score = analysis::score(item_count, category);
        info!("{} 📊 物品 {} 件，荣誉积分 {}", ctx, item_count, honor_score);

        log.success(format!(
            "*PROCESS COMPLETE:* {} waste fully treated.",
            category.display_name()
        ));

        self.send_notification(ctx, category.tag().to_string(), honor_score, log)
            .await
    }

    /// 混合垃圾分支
    async fn run_mixed(&self, ctx: &RunCtx, image: &ImageData, log: &mut ReportLog) -> RunOutcome {
        log.warning("🟡 Classifier identified MIXED waste. Routing to Separator Agent...");

        let separator_report = match self
            .ask(ctx, AgentRole::Separator, prompts::separator_prompt(), image)
            .await
        {
            Ok(text) => text,
            Err(e) => return self.abort(ctx, AgentRole::Separator, e.to_string(), log),
        };

        log.subheader("A. Separator Agent Report");
        log.markdown(separator_report.clone());

        let decision = analysis::aggregate(&separator_report);
        let dominant = match decision.dominant {
            Some(dominant) => dominant,
            None => {
                warn!("{} ⚠️ 分拣报告中未识别到物品 (共 {} 行计数)", ctx, decision.total_items);
                log.error("Separator Agent could not identify specific items to route.");
                return RunOutcome::NoItemsIdentified;
            }
        };

        log.subheader("B. Routing Plan");
        for (category, count) in decision.tally.iter() {
            log.markdown(format!(
                "🔹 *{} {}* item(s) logged for the {} treatment workflow.",
                count,
                category.tag(),
                category.tag().to_uppercase()
            ));
        }
        info!(
            "{} 📦 路由计划: {} 个类别，主要类别 {}，共 {} 件",
            ctx,
            decision.tally.len(),
            dominant,
            decision.total_items
        );

        log.subheader(format!(
            "C. Primary Treatment Protocol (based on {})",
            dominant.display_name()
        ));
        self.show_protocol(dominant, log);

        log.subheader("D. Recycling Agent Report (Final Step)");
        let recycling_report = match self.recycle(ctx, image, &separator_report, log).await {
            Ok(text) => text,
            Err(outcome) => return outcome,
        };
        log.markdown(recycling_report);

        let honor_score = analysis::score(decision.total_items, dominant);
        info!("{} 📊 物品 {} 件，荣誉积分 {}", ctx, decision.total_items, honor_score);

        log.success(format!(
            "*PROCESS COMPLETE:* Primary treatment for {} finished.",
            dominant.display_name()
        ));

        self.send_notification(ctx, mixed_label(dominant), honor_score, log)
            .await
    }

    /// 回收 Agent；失败时直接给出终止状态
    async fn recycle(
        &self,
        ctx: &RunCtx,
        image: &ImageData,
        item_report: &str,
        log: &mut ReportLog,
    ) -> Result<String, RunOutcome> {
        log.info("Recycling Agent is identifying recyclable items and providing a protocol...");
        self.ask(ctx, AgentRole::Recycling, prompts::recycling_prompt(item_report), image)
            .await
            .map_err(|e| self.abort(ctx, AgentRole::Recycling, e.to_string(), log))
    }

    fn show_protocol(&self, category: WasteCategory, log: &mut ReportLog) {
        match treatment_protocol(category) {
            Some(protocol) => {
                if let Some(warning) = protocol.warning {
                    log.warning(warning);
                }
                log.markdown(protocol.to_markdown());
            }
            None => debug!("类别 {} 没有对应的处理流程", category),
        }
    }

    async fn send_notification(
        &self,
        ctx: &RunCtx,
        waste_type: String,
        honor_score: u64,
        log: &mut ReportLog,
    ) -> RunOutcome {
        info!("{} 📤 正在发送处理确认...", ctx);
        let payload = NotificationPayload::new(&ctx.user_id, waste_type.clone(), honor_score);

        match self.notifier.notify(&payload).await {
            Ok(()) => {
                info!("{} ✓ 处理确认已发送", ctx);
                log.success("Process confirmation sent successfully.");
                RunOutcome::Treated {
                    waste_type,
                    honor_score,
                }
            }
            Err(e) => {
                error!("{} ❌ 处理确认发送失败: {}", ctx, e);
                log.error(match &e {
                    NotifyError::BadStatus { status } => {
                        format!("Confirmation could not be sent (Status: {}).", status)
                    }
                    NotifyError::Connection(_) => {
                        "Connection Error: Could not connect to the confirmation service.".to_string()
                    }
                    NotifyError::NotConfigured => {
                        "Confirmation could not be sent: no confirmation service is configured.".to_string()
                    }
                });
                RunOutcome::TreatedNotificationFailed {
                    waste_type,
                    honor_score,
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn ask(
        &self,
        ctx: &RunCtx,
        role: AgentRole,
        prompt: String,
        image: &ImageData,
    ) -> AppResult<String> {
        let request = AgentRequest::new(role, prompt, image);
        let text = self.generator.generate(&request).await?;

        if self.verbose_logging {
            info!("{} {} 回复: {}", ctx, role, truncate_text(&text, 200));
        } else {
            debug!("{} {} 回复 {} 字符", ctx, role, text.chars().count());
        }

        Ok(text)
    }

    fn abort(&self, ctx: &RunCtx, stage: AgentRole, reason: String, log: &mut ReportLog) -> RunOutcome {
        error!("{} ❌ {} 调用失败: {}", ctx, stage, reason);
        log.error(format!("{} failed: {}", stage, reason));
        RunOutcome::Aborted { stage, reason }
    }
}
