pub mod run_ctx;
pub mod run_report;
pub mod waste_flow;

pub use run_ctx::RunCtx;
pub use run_report::{ReportEntry, RunOutcome, RunReport};
pub use waste_flow::{mixed_label, WasteFlow};
