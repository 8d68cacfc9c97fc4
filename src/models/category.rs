use std::fmt;
use std::str::FromStr;

use phf::phf_map;
use serde::{Deserialize, Serialize};

/// 垃圾类别
///
/// 变体的声明顺序即为优先级顺序（生物可降解 > 不可降解 > 电子垃圾），
/// `Ord` 依赖这个顺序来决定统计表的遍历顺序和并列时的取舍。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum WasteCategory {
    #[serde(rename = "biodegradable")]
    Biodegradable,
    #[serde(rename = "non-biodegradable")]
    NonBiodegradable,
    #[serde(rename = "e-waste")]
    EWaste,
    #[serde(rename = "mixed")]
    Mixed,
    #[serde(rename = "unknown")]
    Unknown,
}

static CATEGORY_TAGS: phf::Map<&'static str, WasteCategory> = phf_map! {
    "biodegradable" => WasteCategory::Biodegradable,
    "non-biodegradable" => WasteCategory::NonBiodegradable,
    "e-waste" => WasteCategory::EWaste,
    "mixed" => WasteCategory::Mixed,
    "unknown" => WasteCategory::Unknown,
};

impl WasteCategory {
    /// 可直接进入处理流程的三个类别，按优先级排列
    pub const TREATABLE: [WasteCategory; 3] = [
        WasteCategory::Biodegradable,
        WasteCategory::NonBiodegradable,
        WasteCategory::EWaste,
    ];

    /// 小写标签
    pub fn tag(self) -> &'static str {
        match self {
            WasteCategory::Biodegradable => "biodegradable",
            WasteCategory::NonBiodegradable => "non-biodegradable",
            WasteCategory::EWaste => "e-waste",
            WasteCategory::Mixed => "mixed",
            WasteCategory::Unknown => "unknown",
        }
    }

    /// 展示用名称
    pub fn display_name(self) -> &'static str {
        match self {
            WasteCategory::Biodegradable => "Biodegradable",
            WasteCategory::NonBiodegradable => "Non-Biodegradable",
            WasteCategory::EWaste => "E-Waste",
            WasteCategory::Mixed => "Mixed",
            WasteCategory::Unknown => "Unknown",
        }
    }

    pub fn is_treatable(self) -> bool {
        Self::TREATABLE.contains(&self)
    }

    /// 按标签查找，大小写和首尾空白不敏感
    pub fn from_tag(tag: &str) -> Option<Self> {
        CATEGORY_TAGS.get(tag.trim().to_lowercase().as_str()).copied()
    }
}

impl fmt::Display for WasteCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

/// 未知的类别标签
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("未知的垃圾类别标签: {0}")]
pub struct UnknownTag(pub String);

impl FromStr for WasteCategory {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_tag(s).ok_or_else(|| UnknownTag(s.to_string()))
    }
}
