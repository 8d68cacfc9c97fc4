pub mod category;
pub mod report;

pub use category::{UnknownTag, WasteCategory};
pub use report::{CategoryTally, ClassificationResult, LineItem, RoutingDecision};
