//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::App (处理一次上传：校验 + 读图)
//!     ↓
//! workflow::WasteFlow (处理一张图片)
//!     ↓
//! services (能力层：llm / notify)  +  analysis (纯逻辑：分类 / 聚合 / 评分)
//!     ↓
//! infrastructure (基础设施：ImageData)
//! ```

pub mod app;

pub use app::App;
