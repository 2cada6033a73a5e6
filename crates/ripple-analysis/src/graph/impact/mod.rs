//! Impact analysis — what a change reaches and which tests see it.

pub mod analyzer;
pub mod prepared;
pub mod types;

pub use analyzer::{analyze, ImpactAnalyzer};
pub use prepared::PreparedUnit;
pub use types::{ChangedMethodSet, ImpactReport, ImpactResult, LineChanges, LineRange};
