//! 各 Agent 的提示词

use std::fmt;

use crate::models::WasteCategory;

/// 参与流程的 Agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentRole {
    Classifier,
    ComponentIdentification,
    Separator,
    Recycling,
}

impl AgentRole {
    pub fn name(self) -> &'static str {
        match self {
            AgentRole::Classifier => "Classifier Agent",
            AgentRole::ComponentIdentification => "Component Identification Agent",
            AgentRole::Separator => "Separator Agent",
            AgentRole::Recycling => "Recycling Agent",
        }
    }
}

impl fmt::Display for AgentRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn classifier_prompt() -> String {
    "You are a Classifier Agent. Classify the waste in this image as 'biodegradable', \
     'non-biodegradable', 'mixed', or 'e-waste'. Give a one-sentence reason."
        .to_string()
}

pub fn component_prompt(category: WasteCategory) -> String {
    format!(
        "You are a Component Identification Agent. Look at this image of {} waste. \
         List the specific items you see as a simple bulleted list.",
        category.tag()
    )
}

pub fn separator_prompt() -> String {
    "You are a specialized Separator Agent. Identify each distinct item in this image. \
     Provide a count for each category you find (e.g., '- 2 Plastic bottles', '- 1 Apple core')."
        .to_string()
}

/// 回收 Agent 的提示词，以上一步的物品清单为输入
pub fn recycling_prompt(component_report: &str) -> String {
    format!(
        r#"You are a Recycling Agent. Based on the following list of items:
{}
Identify all the recyclable items, provide a count for each type (e.g., '3 plastic bottles'), and then provide a step-by-step recycling protocol for the most dominant recyclable material. Finally, describe what the recycled material could become."#,
        component_report.trim()
    )
}
