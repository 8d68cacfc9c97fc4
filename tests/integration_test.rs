use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use waste_agents::error::{AppError, AppResult, NotifyError};
use waste_agents::services::{AgentRequest, AgentRole, Generator, NotificationPayload, Notifier};
use waste_agents::workflow::ReportEntry;
use waste_agents::{App, Config, ImageData, RunCtx, RunOutcome, WasteCategory, WasteFlow};

/// 按 Agent 返回预设回复的生成器
#[derive(Clone, Default)]
struct ScriptedGenerator {
    responses: HashMap<AgentRole, Result<String, String>>,
    calls: Arc<Mutex<Vec<AgentRole>>>,
}

impl ScriptedGenerator {
    fn reply(mut self, role: AgentRole, text: &str) -> Self {
        self.responses.insert(role, Ok(text.to_string()));
        self
    }

    fn fail(mut self, role: AgentRole, message: &str) -> Self {
        self.responses.insert(role, Err(message.to_string()));
        self
    }

    fn calls(&self) -> Vec<AgentRole> {
        self.calls.lock().unwrap().clone()
    }
}

impl Generator for ScriptedGenerator {
    async fn generate(&self, request: &AgentRequest<'_>) -> AppResult<String> {
        self.calls.lock().unwrap().push(request.role);
        match self.responses.get(&request.role) {
            Some(Ok(text)) => Ok(text.clone()),
            Some(Err(message)) => Err(AppError::llm_api_failed("scripted", message)),
            None => Err(AppError::llm_api_failed("scripted", "no scripted reply")),
        }
    }
}

/// 通知失败方式
#[derive(Clone, Copy, Debug)]
enum NotifyFailure {
    Status(u16),
    NotConfigured,
    Connection,
}

/// 记录所有通知；`failure` 非空时返回对应错误
#[derive(Clone, Default)]
struct RecordingNotifier {
    failure: Option<NotifyFailure>,
    sent: Arc<Mutex<Vec<NotificationPayload>>>,
}

impl RecordingNotifier {
    fn failing(status: u16) -> Self {
        Self::failing_with(NotifyFailure::Status(status))
    }

    fn failing_with(failure: NotifyFailure) -> Self {
        Self {
            failure: Some(failure),
            ..Self::default()
        }
    }

    fn sent(&self) -> Vec<NotificationPayload> {
        self.sent.lock().unwrap().clone()
    }
}

impl Notifier for RecordingNotifier {
    async fn notify(&self, payload: &NotificationPayload) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(payload.clone());
        match self.failure {
            None => Ok(()),
            Some(NotifyFailure::Status(status)) => Err(NotifyError::BadStatus { status }),
            Some(NotifyFailure::NotConfigured) => Err(NotifyError::NotConfigured),
            Some(NotifyFailure::Connection) => {
                // 非法 URL 在发送前就失败，不会产生网络请求
                let err = reqwest::Client::new()
                    .post("not a url")
                    .send()
                    .await
                    .unwrap_err();
                Err(NotifyError::Connection(err))
            }
        }
    }
}

fn test_image() -> ImageData {
    ImageData::new("bin.png", "image/png", vec![0x89, 0x50, 0x4E, 0x47])
}

fn test_ctx() -> RunCtx {
    RunCtx::with_id("test", "user@example.com")
}

fn flow(generator: &ScriptedGenerator, notifier: &RecordingNotifier) -> WasteFlow<ScriptedGenerator, RecordingNotifier> {
    WasteFlow::with_collaborators(generator.clone(), notifier.clone(), &Config::default())
}

fn has_entry(entries: &[ReportEntry], needle: &str) -> bool {
    entries.iter().any(|entry| match entry {
        ReportEntry::Header(t)
        | ReportEntry::Subheader(t)
        | ReportEntry::Markdown(t)
        | ReportEntry::Info(t)
        | ReportEntry::Warning(t)
        | ReportEntry::Success(t)
        | ReportEntry::Error(t) => t.contains(needle),
    })
}

#[tokio::test]
async fn test_direct_e_waste_run() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "E-waste: the image shows an old smartphone.")
        .reply(
            AgentRole::ComponentIdentification,
            "- Old phone\n- Charging cable\n- Lithium battery",
        )
        .reply(AgentRole::Recycling, "Recover the copper from the cable.");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.category, Some(WasteCategory::EWaste));
    // 3 个非空行 × 25
    assert_eq!(
        report.outcome,
        RunOutcome::Treated {
            waste_type: "e-waste".to_string(),
            honor_score: 75
        }
    );
    assert_eq!(
        generator.calls(),
        vec![
            AgentRole::Classifier,
            AgentRole::ComponentIdentification,
            AgentRole::Recycling
        ]
    );
    assert_eq!(
        notifier.sent(),
        vec![NotificationPayload::new("user@example.com", "e-waste", 75)]
    );
    assert!(has_entry(&report.entries, "*Determined Category:* E-WASTE"));
    assert!(has_entry(&report.entries, "toxic heavy metals"));
    assert!(has_entry(&report.entries, "Recover the copper"));
    assert!(has_entry(&report.entries, "E-Waste waste fully treated."));
}

#[tokio::test]
async fn test_direct_non_biodegradable_uses_line_count() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "This is non-biodegradable plastic packaging.")
        // 行首数字不参与直接路径的计数
        .reply(AgentRole::ComponentIdentification, "- 4 Plastic bottles\n\n- Bottle cap\n")
        .reply(AgentRole::Recycling, "Shred and pelletize.");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.category, Some(WasteCategory::NonBiodegradable));
    assert_eq!(report.outcome.honor_score(), Some(30));
    assert_eq!(notifier.sent()[0].waste_type, "non-biodegradable");
}

#[tokio::test]
async fn test_mixed_run_routes_to_dominant_category() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "Mixed waste: bottles and fruit.")
        .reply(AgentRole::Separator, "- 2 Plastic bottles\n- 1 Apple core")
        .reply(AgentRole::Recycling, "The bottles can become fleece.");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.category, Some(WasteCategory::Mixed));
    // total_items 3 × non-biodegradable 权重 15
    assert_eq!(
        report.outcome,
        RunOutcome::Treated {
            waste_type: "Mixed (Major: Non-Biodegradable)".to_string(),
            honor_score: 45
        }
    );
    assert_eq!(
        generator.calls(),
        vec![AgentRole::Classifier, AgentRole::Separator, AgentRole::Recycling]
    );

    let routing: Vec<&ReportEntry> = report
        .entries
        .iter()
        .filter(|entry| matches!(entry, ReportEntry::Markdown(t) if t.starts_with("🔹")))
        .collect();
    assert_eq!(
        routing,
        vec![
            &ReportEntry::Markdown(
                "🔹 *1 biodegradable* item(s) logged for the BIODEGRADABLE treatment workflow.".to_string()
            ),
            &ReportEntry::Markdown(
                "🔹 *2 non-biodegradable* item(s) logged for the NON-BIODEGRADABLE treatment workflow."
                    .to_string()
            ),
        ]
    );
    assert!(has_entry(&report.entries, "C. Primary Treatment Protocol (based on Non-Biodegradable)"));
    assert!(has_entry(&report.entries, "AI-Powered Optical Sorting"));
}

#[tokio::test]
async fn test_mixed_tie_prefers_biodegradable() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "mixed")
        .reply(AgentRole::Separator, "1 apple\n1 battery")
        .reply(AgentRole::Recycling, "ok");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    // total_items 2 × biodegradable 权重 10
    assert_eq!(
        notifier.sent(),
        vec![NotificationPayload::new("user@example.com", "Mixed (Major: Biodegradable)", 20)]
    );
    assert!(report.outcome.is_treated());
}

#[tokio::test]
async fn test_mixed_without_identified_items_stops_before_notification() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "This looks like mixed waste.")
        .reply(AgentRole::Separator, "- 1 Mystery object");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.outcome, RunOutcome::NoItemsIdentified);
    assert_eq!(generator.calls(), vec![AgentRole::Classifier, AgentRole::Separator]);
    assert!(notifier.sent().is_empty());
    assert!(has_entry(&report.entries, "could not identify specific items"));
}

#[tokio::test]
async fn test_unknown_category_is_reported_without_notification() {
    let generator = ScriptedGenerator::default().reply(AgentRole::Classifier, "I am not sure what this is.");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.category, Some(WasteCategory::Unknown));
    assert_eq!(
        report.outcome,
        RunOutcome::Unclassified {
            raw_response: "I am not sure what this is.".to_string()
        }
    );
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_classifier_failure_degrades_to_unknown() {
    let generator = ScriptedGenerator::default().fail(AgentRole::Classifier, "503 Service Unavailable");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.category, Some(WasteCategory::Unknown));
    assert!(matches!(report.outcome, RunOutcome::Unclassified { ref raw_response } if raw_response.is_empty()));
    assert!(has_entry(&report.entries, "Classifier Agent did not respond"));
}

#[tokio::test]
async fn test_notification_failure_keeps_treatment() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "biodegradable food scraps")
        .reply(AgentRole::ComponentIdentification, "- Banana peel\n- Apple core")
        .reply(AgentRole::Recycling, "Compost them.");
    let notifier = RecordingNotifier::failing(500);

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    match &report.outcome {
        RunOutcome::TreatedNotificationFailed {
            waste_type,
            honor_score,
            ..
        } => {
            assert_eq!(waste_type, "biodegradable");
            assert_eq!(*honor_score, 20);
        }
        other => panic!("unexpected outcome: {:?}", other),
    }
    assert!(has_entry(&report.entries, "Biodegradable waste fully treated."));
    assert!(has_entry(&report.entries, "Confirmation could not be sent (Status: 500)."));
    assert_eq!(notifier.sent().len(), 1);
}

#[tokio::test]
async fn test_component_failure_aborts_run() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "e-waste")
        .fail(AgentRole::ComponentIdentification, "timeout");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert!(matches!(
        report.outcome,
        RunOutcome::Aborted {
            stage: AgentRole::ComponentIdentification,
            ..
        }
    ));
    assert!(notifier.sent().is_empty());
}

#[tokio::test]
async fn test_separator_failure_aborts_run() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "Mixed waste: cans and peels.")
        .fail(AgentRole::Separator, "503 Service Unavailable");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert_eq!(report.category, Some(WasteCategory::Mixed));
    assert!(matches!(
        report.outcome,
        RunOutcome::Aborted {
            stage: AgentRole::Separator,
            ..
        }
    ));
    assert_eq!(generator.calls(), vec![AgentRole::Classifier, AgentRole::Separator]);
    assert!(notifier.sent().is_empty());
    assert!(has_entry(&report.entries, "Separator Agent failed"));
}

#[tokio::test]
async fn test_recycling_failure_aborts_after_protocol() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "biodegradable food scraps")
        .reply(AgentRole::ComponentIdentification, "- Banana peel")
        .fail(AgentRole::Recycling, "timeout");
    let notifier = RecordingNotifier::default();

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert!(matches!(
        report.outcome,
        RunOutcome::Aborted {
            stage: AgentRole::Recycling,
            ..
        }
    ));
    assert!(notifier.sent().is_empty());
    // 处理流程已经展示过，但不会宣告处理完成
    assert!(has_entry(&report.entries, "Mechanical Shredding"));
    assert!(has_entry(&report.entries, "Recycling Agent failed"));
    assert!(!has_entry(&report.entries, "fully treated"));
}

#[tokio::test]
async fn test_notification_connection_error_message() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "e-waste")
        .reply(AgentRole::ComponentIdentification, "- Old phone")
        .reply(AgentRole::Recycling, "Recover the gold.");
    let notifier = RecordingNotifier::failing_with(NotifyFailure::Connection);

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert!(matches!(
        report.outcome,
        RunOutcome::TreatedNotificationFailed { honor_score: 25, .. }
    ));
    assert!(has_entry(
        &report.entries,
        "Connection Error: Could not connect to the confirmation service."
    ));
}

#[tokio::test]
async fn test_notification_not_configured_message() {
    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "non-biodegradable plastic")
        .reply(AgentRole::ComponentIdentification, "- Bottle\n- Cap")
        .reply(AgentRole::Recycling, "Pelletize.");
    let notifier = RecordingNotifier::failing_with(NotifyFailure::NotConfigured);

    let report = flow(&generator, &notifier).run(&test_ctx(), &test_image()).await;

    assert!(matches!(
        report.outcome,
        RunOutcome::TreatedNotificationFailed { honor_score: 30, .. }
    ));
    assert!(has_entry(
        &report.entries,
        "Confirmation could not be sent: no confirmation service is configured."
    ));
    assert!(has_entry(&report.entries, "Non-Biodegradable waste fully treated."));
}

#[tokio::test]
async fn test_app_requires_user_id_before_reading_image() {
    let generator = ScriptedGenerator::default();
    let notifier = RecordingNotifier::default();
    let app = App::with_flow(flow(&generator, &notifier));

    // 图片路径不存在也不会报错，因为流程根本没有开始
    let report = app
        .process_upload(Path::new("/nonexistent/waste.png"), "   ")
        .await
        .unwrap();

    assert_eq!(report.outcome, RunOutcome::MissingUserId);
    assert_eq!(report.category, None);
    assert!(generator.calls().is_empty());
}

#[tokio::test]
async fn test_app_reports_missing_image() {
    let generator = ScriptedGenerator::default();
    let notifier = RecordingNotifier::default();
    let app = App::with_flow(flow(&generator, &notifier));

    let result = app
        .process_upload(Path::new("/nonexistent/waste.png"), "user@example.com")
        .await;

    assert!(matches!(result, Err(AppError::Image(_))));
}

#[tokio::test]
async fn test_app_processes_upload_from_disk() {
    let path = std::env::temp_dir().join(format!("waste_agents_app_{}.png", std::process::id()));
    tokio::fs::write(&path, [0x89u8, 0x50, 0x4E, 0x47]).await.unwrap();

    let generator = ScriptedGenerator::default()
        .reply(AgentRole::Classifier, "electronic waste")
        .reply(AgentRole::ComponentIdentification, "- Remote control")
        .reply(AgentRole::Recycling, "Remove the batteries.");
    let notifier = RecordingNotifier::default();
    let app = App::with_flow(flow(&generator, &notifier));

    let report = app.process_upload(&path, "user@example.com").await;
    let _ = tokio::fs::remove_file(&path).await;

    assert_eq!(report.unwrap().outcome.honor_score(), Some(25));
}

/// 需要真实的 LLM_API_KEY、NOTIFY_WEBHOOK_URL 和一张本地图片：
/// ```bash
/// WASTE_IMAGE=bin.jpg WASTE_EMAIL=me@example.com cargo test test_live_upload -- --ignored --nocapture
/// ```
#[tokio::test]
#[ignore]
async fn test_live_upload() {
    waste_agents::utils::logging::init(true);

    let config = Config::load().expect("加载配置失败");
    let image = std::env::var("WASTE_IMAGE").expect("需要设置 WASTE_IMAGE");
    let email = std::env::var("WASTE_EMAIL").expect("需要设置 WASTE_EMAIL");

    let app = App::initialize(&config);
    let report = app
        .process_upload(Path::new(&image), &email)
        .await
        .expect("处理失败");

    println!("{}", report.render());
}
