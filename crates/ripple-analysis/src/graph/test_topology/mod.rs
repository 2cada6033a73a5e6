//! Test topology — which methods are tests, and which changed business
//! methods no test reaches.

pub mod coverage;
pub mod identifier;
pub mod types;

pub use coverage::CoverageAnalyzer;
pub use identifier::TestIdentifier;
pub use types::{CoverageStats, RiskLevel, TestGap, TestMethodSet};
