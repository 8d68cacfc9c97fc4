//! 分类文本标准化
//!
//! 把分类 Agent 的自由文本回复映射到固定的类别标签。

use crate::models::{ClassificationResult, WasteCategory};

/// 有序规则表，先命中先返回。
///
/// `non-biodegradable` 必须排在 `biodegradable` 之前，否则会被其子串误判。
const CLASSIFICATION_RULES: &[(&[&str], WasteCategory)] = &[
    (&["e-waste", "electronic"], WasteCategory::EWaste),
    (&["mixed"], WasteCategory::Mixed),
    (
        &["non-biodegradable", "non biodegradable"],
        WasteCategory::NonBiodegradable,
    ),
    (&["biodegradable"], WasteCategory::Biodegradable),
];

/// 将分类文本映射到类别，大小写不敏感。无法识别时返回 `Unknown`。
pub fn classify(text: &str) -> WasteCategory {
    let lower = text.to_lowercase();

    CLASSIFICATION_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, category)| *category)
        .unwrap_or(WasteCategory::Unknown)
}

/// 分类并保留原始回复
pub fn classify_response(text: &str) -> ClassificationResult {
    ClassificationResult {
        category: classify(text),
        reasoning: text.trim().to_string(),
    }
}
