//! # Waste Agents
//!
//! 多 Agent 垃圾分类与处理流程
//!
//! ## 架构设计
//!
//! ### ① 基础设施层（Infrastructure）
//! - `infrastructure/` - 读取上传图片，编码为 data URL
//!
//! ### ② 纯逻辑层（Analysis）
//! - `classifier` - 分类文本标准化
//! - `aggregator` - 分拣报告聚合、主要类别
//! - `scoring` - 荣誉积分
//! - `protocol` - 固定处理流程
//!
//! ### ③ 业务能力层（Services）
//! - `LlmService` - 看图生成文本
//! - `NotifyService` - webhook 通知
//!
//! ### ④ 流程层（Workflow）
//! - `RunCtx` - 上下文封装（run_id + 用户邮箱）
//! - `WasteFlow` - 流程编排（分类 → 分支 → 评分 → 通知）
//!
//! ### ⑤ 编排层（Orchestration）
//! - `orchestrator/app` - 输入校验、读图、运行统计

pub mod analysis;
pub mod config;
pub mod error;
pub mod infrastructure;

pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use analysis::{aggregate, classify, count_report_lines, score};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use infrastructure::ImageData;
pub use models::{CategoryTally, ClassificationResult, LineItem, RoutingDecision, WasteCategory};
pub use orchestrator::App;
pub use workflow::{RunCtx, RunOutcome, RunReport, WasteFlow};
