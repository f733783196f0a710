//! Cardio-Analysis: diagnostics over readings and measurement history
//!
//! Series classification, trend heuristics, full-history reporting, and the
//! CSV export of stored measurements.

pub mod classifier;
pub mod export;
pub mod report;
pub mod trend;

pub use classifier::{Classification, ConditionClassifier};
pub use export::{history_csv, CSV_HEADER};
pub use report::{HealthReport, OverallCondition, ReportGenerator};
pub use trend::{TrendAnalyzer, TrendInsight, TrendKind};
