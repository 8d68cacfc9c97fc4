use phf::phf_map;

use crate::models::WasteCategory;

/// 未列出的类别（mixed、unknown 或任意标签）使用的权重
pub const DEFAULT_WEIGHT: u64 = 5;

static CATEGORY_WEIGHTS: phf::Map<&'static str, u64> = phf_map! {
    "e-waste" => 25,
    "non-biodegradable" => 15,
    "biodegradable" => 10,
};

/// 按标签查询权重
pub fn weight_for_tag(tag: &str) -> u64 {
    CATEGORY_WEIGHTS.get(tag).copied().unwrap_or(DEFAULT_WEIGHT)
}

/// 荣誉积分 = 物品数 × 类别权重
pub fn score(item_count: u64, category: WasteCategory) -> u64 {
    score_for_tag(item_count, category.tag())
}

pub fn score_for_tag(item_count: u64, tag: &str) -> u64 {
    item_count.saturating_mul(weight_for_tag(tag))
}
