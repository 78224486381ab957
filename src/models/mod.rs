pub mod config;
pub mod plan_report;

pub use config::{OutputMode, Overrides, QuantizerKind, ViewerConfig};
pub use plan_report::{PlanCells, PlanReport};
