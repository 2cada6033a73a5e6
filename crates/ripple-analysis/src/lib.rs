//! ripple-analysis — the impact engine.
//!
//! Source facts come in through a [`SourceModel`]; a bounded file set becomes
//! an [`AnalysisUnit`], then a call graph, its reverse, a test set, and
//! finally an impact report with coverage gaps.

pub mod call_graph;
pub mod graph;
pub mod source_model;

pub use call_graph::{reverse, transitive_callers, AnalysisUnit, CallGraph, CallGraphBuilder, ReverseCallGraph};
pub use graph::impact::{ImpactAnalyzer, ImpactReport, ImpactResult, PreparedUnit};
pub use graph::test_topology::{RiskLevel, TestGap, TestIdentifier, TestMethodSet};
pub use source_model::{JavaSourceModel, SourceFile, SourceModel};
