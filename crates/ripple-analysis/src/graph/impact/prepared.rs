//! PreparedUnit — graph, reverse graph, and tests for one analysis unit.

use ripple_core::config::AnalysisConfig;
use ripple_core::types::collections::FxHashMap;

use crate::call_graph::{reverse, AnalysisUnit, CallGraphBuild, CallGraphBuilder, ReverseCallGraph};
use crate::graph::test_topology::{TestIdentifier, TestMethodSet};

use super::analyzer::ImpactAnalyzer;
use super::types::{ChangedMethodSet, LineChanges};

/// Built once per unit, then queried for any number of changes.
#[derive(Debug, Clone)]
pub struct PreparedUnit {
    pub build: CallGraphBuild,
    pub reverse: ReverseCallGraph,
    pub tests: TestMethodSet,
}

impl PreparedUnit {
    pub fn prepare(unit: &AnalysisUnit) -> Self {
        let build = CallGraphBuilder::new().build(unit);
        let reverse = reverse(&build.graph);
        let tests = TestIdentifier::new().identify(unit);
        Self {
            build,
            reverse,
            tests,
        }
    }

    /// Vertices whose line span intersects any changed range of its file.
    pub fn changed_methods(&self, changes: &[LineChanges]) -> ChangedMethodSet {
        let by_path: FxHashMap<&str, &LineChanges> =
            changes.iter().map(|c| (c.path.as_str(), c)).collect();

        self.build
            .spans
            .iter()
            .filter(|span| {
                by_path.get(span.file.as_str()).is_some_and(|c| {
                    c.ranges.iter().any(|r| span.overlaps(r.start, r.end))
                })
            })
            .map(|span| span.method.clone())
            .collect()
    }

    pub fn analyzer<'a>(&'a self, config: &'a AnalysisConfig) -> ImpactAnalyzer<'a> {
        ImpactAnalyzer::new(&self.build.graph, &self.reverse, &self.tests, config)
    }
}
