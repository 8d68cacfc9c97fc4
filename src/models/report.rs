//! 报告解析结果的数据结构

use std::collections::BTreeMap;

use crate::models::category::WasteCategory;

/// 分类结果：标准化类别 + 模型原始回复
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassificationResult {
    pub category: WasteCategory,
    pub reasoning: String,
}

/// 报告中的一行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineItem {
    pub description: String,
    /// 始终 >= 1
    pub count: u32,
}

/// 各类别物品计数
///
/// 只接受三个可处理类别，且只保留计数大于 0 的条目。
/// 遍历顺序固定为 biodegradable, non-biodegradable, e-waste。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTally {
    counts: BTreeMap<WasteCategory, u64>,
}

impl CategoryTally {
    pub fn new() -> Self {
        Self::default()
    }

    /// 记录计数；`mixed` / `unknown` 和 0 计数被忽略
    pub fn record(&mut self, category: WasteCategory, count: u64) {
        if !category.is_treatable() || count == 0 {
            return;
        }
        let entry = self.counts.entry(category).or_insert(0);
        *entry = entry.saturating_add(count);
    }

    pub fn get(&self, category: WasteCategory) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WasteCategory, u64)> + '_ {
        self.counts.iter().map(|(category, count)| (*category, *count))
    }

    /// 计数最多的类别；并列时取优先级靠前的类别
    pub fn dominant(&self) -> Option<WasteCategory> {
        let mut best: Option<(WasteCategory, u64)> = None;
        for (category, count) in self.iter() {
            match best {
                Some((_, best_count)) if count <= best_count => {}
                _ => best = Some((category, count)),
            }
        }
        best.map(|(category, _)| category)
    }
}

/// 分拣报告的路由结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoutingDecision {
    pub tally: CategoryTally,
    pub dominant: Option<WasteCategory>,
    /// 所有行的计数之和，包括未归类的行
    pub total_items: u64,
}
