//! 纯逻辑层（Analysis）
//!
//! 不做任何 IO，只负责把模型文本转换为结构化结果：
//! - `classifier` - 分类文本 → 类别
//! - `aggregator` - 分拣报告 → 类别计数 / 主要类别
//! - `scoring` - 荣誉积分
//! - `protocol` - 固定处理流程查表

pub mod aggregator;
pub mod classifier;
pub mod protocol;
pub mod scoring;

pub use aggregator::{aggregate, categorize_line, count_report_lines, parse_line_item};
pub use classifier::{classify, classify_response};
pub use protocol::{treatment_protocol, ProtocolStep, TreatmentProtocol};
pub use scoring::{score, score_for_tag, weight_for_tag, DEFAULT_WEIGHT};
