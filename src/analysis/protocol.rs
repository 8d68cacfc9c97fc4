//! 固定的处理流程说明，只做查表和渲染

use crate::models::WasteCategory;

/// 处理步骤
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtocolStep {
    pub title: &'static str,
    pub detail: &'static str,
}

/// 某一类别的自动化处理流程
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreatmentProtocol {
    pub category: WasteCategory,
    /// 需要醒目展示的警告
    pub warning: Option<&'static str>,
    pub steps: &'static [ProtocolStep],
}

impl TreatmentProtocol {
    /// 渲染为带编号的 markdown 步骤列表
    pub fn to_markdown(&self) -> String {
        self.steps
            .iter()
            .enumerate()
            .map(|(i, step)| format!("*{}. {}:* {}", i + 1, step.title, step.detail))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

static BIODEGRADABLE: TreatmentProtocol = TreatmentProtocol {
    category: WasteCategory::Biodegradable,
    warning: None,
    steps: &[
        ProtocolStep {
            title: "Mechanical Shredding",
            detail: "Waste is first shredded into smaller, uniform pieces.",
        },
        ProtocolStep {
            title: "Anaerobic Digestion",
            detail: "Shredded material is moved into an oxygen-free digester to produce biogas and digestate.",
        },
        ProtocolStep {
            title: "Curing and Maturation",
            detail: "The digestate is stabilized to create high-quality compost.",
        },
    ],
};

static NON_BIODEGRADABLE: TreatmentProtocol = TreatmentProtocol {
    category: WasteCategory::NonBiodegradable,
    warning: None,
    steps: &[
        ProtocolStep {
            title: "AI-Powered Optical Sorting",
            detail: "AI identifies and sorts materials on conveyors.",
        },
        ProtocolStep {
            title: "Cleaning and Granulation",
            detail: "Sorted materials are washed and shredded into flakes.",
        },
        ProtocolStep {
            title: "Extrusion and Pelletizing",
            detail: "Flakes are melted and turned into pellets for manufacturing.",
        },
    ],
};

static E_WASTE: TreatmentProtocol = TreatmentProtocol {
    category: WasteCategory::EWaste,
    warning: Some("*CRITICAL:* E-waste contains toxic heavy metals like lead and mercury."),
    steps: &[
        ProtocolStep {
            title: "Robotic Dismantling",
            detail: "Automated arms remove high-risk components like batteries.",
        },
        ProtocolStep {
            title: "Secure Shredding",
            detail: "The remaining components are shredded in an enclosed environment.",
        },
        ProtocolStep {
            title: "Material Separation",
            detail: "Magnets and eddy currents separate metals and plastics.",
        },
        ProtocolStep {
            title: "Precious Metal Recovery",
            detail: "A specialized process extracts valuable metals for reuse.",
        },
    ],
};

/// 查询处理流程；`mixed` / `unknown` 没有对应流程
pub fn treatment_protocol(category: WasteCategory) -> Option<&'static TreatmentProtocol> {
    match category {
        WasteCategory::Biodegradable => Some(&BIODEGRADABLE),
        WasteCategory::NonBiodegradable => Some(&NON_BIODEGRADABLE),
        WasteCategory::EWaste => Some(&E_WASTE),
        WasteCategory::Mixed | WasteCategory::Unknown => None,
    }
}
