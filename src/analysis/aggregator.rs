//! 分拣报告聚合
//!
//! 把分拣 Agent 的逐行报告（如 `- 2 Plastic bottles`）解析为各类别计数，
//! 并选出主要类别。纯函数，不访问任何外部状态。

use std::sync::OnceLock;

use regex::Regex;

use crate::models::{CategoryTally, LineItem, RoutingDecision, WasteCategory};

/// 每个类别的关键词，按优先级顺序检查，先命中先归类
const LINE_KEYWORDS: &[(&[&str], WasteCategory)] = &[
    (
        &["food", "apple", "peel", "organic", "paper"],
        WasteCategory::Biodegradable,
    ),
    (
        &["plastic", "bottle", "can", "metal", "glass", "wrapper"],
        WasteCategory::NonBiodegradable,
    ),
    (
        &["electronic", "battery", "cable", "phone", "wire"],
        WasteCategory::EWaste,
    ),
];

fn digit_run() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"[0-9]+").expect("静态正则表达式"))
}

/// 解析单行；空行返回 `None`
///
/// 计数取第一段连续数字，没有数字时为 1。0 按 1 计，溢出时取上限。
pub fn parse_line_item(line: &str) -> Option<LineItem> {
    let description = line.trim();
    if description.is_empty() {
        return None;
    }

    let count = match digit_run().find(description) {
        Some(m) => m.as_str().parse::<u32>().unwrap_or(u32::MAX).max(1),
        None => 1,
    };

    Some(LineItem {
        description: description.to_string(),
        count,
    })
}

/// 根据关键词判断一行属于哪个类别
pub fn categorize_line(line: &str) -> Option<WasteCategory> {
    let lower = line.to_lowercase();

    LINE_KEYWORDS
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|kw| lower.contains(kw)))
        .map(|(_, category)| *category)
}

/// 聚合整份报告
///
/// 未命中任何关键词的行只计入 `total_items`。统计表为空时 `dominant` 为 `None`，
/// 调用方应视为“未识别到物品”。
pub fn aggregate(report: &str) -> RoutingDecision {
    let mut tally = CategoryTally::new();
    let mut total_items: u64 = 0;

    for item in report.lines().filter_map(parse_line_item) {
        let count = u64::from(item.count);
        total_items = total_items.saturating_add(count);

        if let Some(category) = categorize_line(&item.description) {
            tally.record(category, count);
        }
    }

    let dominant = tally.dominant();

    RoutingDecision {
        tally,
        dominant,
        total_items,
    }
}

/// 直接类别路径使用的简单计数：非空行数。
///
/// 与 [`aggregate`] 的按数字计数不同，两者分别用于不同路径的评分。
pub fn count_report_lines(report: &str) -> u64 {
    report.lines().filter(|line| !line.trim().is_empty()).count() as u64
}
