//! 运行结果
//!
//! 流程不直接输出到界面，而是按顺序记录要展示的内容，
//! 由调用方决定如何渲染。

use crate::models::WasteCategory;
use crate::services::AgentRole;

/// 一条展示内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportEntry {
    Header(String),
    Subheader(String),
    Markdown(String),
    Info(String),
    Warning(String),
    Success(String),
    Error(String),
}

/// 运行的终止状态
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 处理完成且通知已送达
    Treated { waste_type: String, honor_score: u64 },
    /// 处理完成，但通知失败（不回滚、不重试）
    TreatedNotificationFailed {
        waste_type: String,
        honor_score: u64,
        reason: String,
    },
    /// 混合垃圾中未识别出任何物品
    NoItemsIdentified,
    /// 分类结果为 unknown
    Unclassified { raw_response: String },
    /// 未提供用户标识，流程未开始
    MissingUserId,
    /// 报告生成步骤失败
    Aborted { stage: AgentRole, reason: String },
}

impl RunOutcome {
    pub fn honor_score(&self) -> Option<u64> {
        match self {
            RunOutcome::Treated { honor_score, .. }
            | RunOutcome::TreatedNotificationFailed { honor_score, .. } => Some(*honor_score),
            _ => None,
        }
    }

    pub fn is_treated(&self) -> bool {
        self.honor_score().is_some()
    }

    /// 简短描述，用于日志
    pub fn summary(&self) -> String {
        match self {
            RunOutcome::Treated {
                waste_type,
                honor_score,
            } => format!("处理完成 ({}, 积分 {})", waste_type, honor_score),
            RunOutcome::TreatedNotificationFailed {
                waste_type,
                honor_score,
                reason,
            } => format!(
                "处理完成 ({}, 积分 {})，通知失败: {}",
                waste_type, honor_score, reason
            ),
            RunOutcome::NoItemsIdentified => "未识别到可分拣的物品".to_string(),
            RunOutcome::Unclassified { .. } => "无法确定垃圾类别".to_string(),
            RunOutcome::MissingUserId => "未提供邮箱，流程未开始".to_string(),
            RunOutcome::Aborted { stage, reason } => format!("{} 失败: {}", stage, reason),
        }
    }
}

/// 单次运行的完整记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// 分类结果；流程未开始时为 `None`
    pub category: Option<WasteCategory>,
    pub entries: Vec<ReportEntry>,
    pub outcome: RunOutcome,
}

impl RunReport {
    /// 流程未开始：缺少用户标识
    pub fn missing_user_id() -> Self {
        Self {
            category: None,
            entries: vec![ReportEntry::Error(
                "❗ Please enter your email address to proceed.".to_string(),
            )],
            outcome: RunOutcome::MissingUserId,
        }
    }

    /// 渲染为终端可读的 markdown 文本
    pub fn render(&self) -> String {
        self.entries
            .iter()
            .map(|entry| match entry {
                ReportEntry::Header(text) => format!("\n## {}", text),
                ReportEntry::Subheader(text) => format!("\n### {}", text),
                ReportEntry::Markdown(text) => text.clone(),
                ReportEntry::Info(text) => format!("ℹ️  {}", text),
                ReportEntry::Warning(text) => format!("⚠️  {}", text),
                ReportEntry::Success(text) => format!("✅ {}", text),
                ReportEntry::Error(text) => format!("❌ {}", text),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// 运行中逐步记录展示内容
#[derive(Debug, Default)]
pub(crate) struct ReportLog {
    entries: Vec<ReportEntry>,
}

impl ReportLog {
    pub fn header(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Header(text.into()));
    }

    pub fn subheader(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Subheader(text.into()));
    }

    pub fn markdown(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Markdown(text.into()));
    }

    pub fn info(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Info(text.into()));
    }

    pub fn warning(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Warning(text.into()));
    }

    pub fn success(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Success(text.into()));
    }

    pub fn error(&mut self, text: impl Into<String>) {
        self.entries.push(ReportEntry::Error(text.into()));
    }

    pub fn finish(self, category: WasteCategory, outcome: RunOutcome) -> RunReport {
        RunReport {
            category: Some(category),
            entries: self.entries,
            outcome,
        }
    }
}
