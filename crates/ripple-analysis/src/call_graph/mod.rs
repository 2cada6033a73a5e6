//! Call graph construction, reversal, and caller traversal.

pub mod builder;
pub mod resolution;
pub mod traversal;
pub mod types;
pub mod unit;

pub use builder::{is_synthetic, CallGraphBuilder};
pub use traversal::{reverse, transitive_callers, UNBOUNDED};
pub use types::{CallGraph, CallGraphBuild, CallGraphStats, MethodSpan, Resolution, ReverseCallGraph};
pub use unit::AnalysisUnit;
