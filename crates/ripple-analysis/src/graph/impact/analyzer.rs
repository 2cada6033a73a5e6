//! ImpactAnalyzer — impacted methods, impacted tests, and coverage gaps
//! for one changed-method set.

use std::collections::{BTreeMap, BTreeSet};

use ripple_core::config::AnalysisConfig;
use ripple_core::MethodRef;

use crate::call_graph::{transitive_callers, CallGraph, ReverseCallGraph, UNBOUNDED};
use crate::graph::test_topology::{CoverageAnalyzer, TestMethodSet};

use super::types::{ChangedMethodSet, ImpactReport, ImpactResult};

/// Borrowed view over one unit's graphs and tests.
pub struct ImpactAnalyzer<'a> {
    graph: &'a CallGraph,
    reverse: &'a ReverseCallGraph,
    tests: &'a TestMethodSet,
    config: &'a AnalysisConfig,
}

impl<'a> ImpactAnalyzer<'a> {
    pub fn new(
        graph: &'a CallGraph,
        reverse: &'a ReverseCallGraph,
        tests: &'a TestMethodSet,
        config: &'a AnalysisConfig,
    ) -> Self {
        Self {
            graph,
            reverse,
            tests,
            config,
        }
    }

    /// Impact plus coverage gaps. Deterministic for a given input.
    pub fn analyze(&self, changed: &ChangedMethodSet) -> ImpactReport {
        let result = self.impact(changed);
        let (gaps, coverage) = self.coverage().analyze(changed, &result.impacted_methods);
        ImpactReport {
            result,
            gaps,
            coverage,
        }
    }

    /// Callers within `max_depth`, and the tests among them. Direct test
    /// callers of changed methods are always included, whatever the depth.
    pub fn impact(&self, changed: &ChangedMethodSet) -> ImpactResult {
        let impacted_methods: BTreeSet<MethodRef> =
            transitive_callers(changed, self.reverse, self.config.max_depth)
                .into_iter()
                .collect();

        let direct_callers = changed.iter().flat_map(|m| self.reverse.callers(m));
        let mut impacted_tests_by_owner: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for test in impacted_methods
            .iter()
            .chain(direct_callers)
            .filter(|m| self.tests.contains(m))
        {
            impacted_tests_by_owner
                .entry(test.owner().to_string())
                .or_default()
                .insert(test.method().to_string());
        }

        ImpactResult {
            impacted_methods,
            impacted_tests_by_owner,
        }
    }

    pub fn direct_callers(&self, method: &MethodRef) -> BTreeSet<MethodRef> {
        self.reverse.callers(method).cloned().collect()
    }

    pub fn direct_callees(&self, method: &MethodRef) -> BTreeSet<MethodRef> {
        self.graph.callees(method).cloned().collect()
    }

    /// Every transitive caller, ignoring `max_depth`.
    pub fn all_callers(&self, method: &MethodRef) -> BTreeSet<MethodRef> {
        transitive_callers([method], self.reverse, UNBOUNDED)
            .into_iter()
            .collect()
    }

    /// Tests that reach `method`, within the gap search depth.
    pub fn related_tests(&self, method: &MethodRef) -> BTreeSet<MethodRef> {
        self.coverage().related_tests(method)
    }

    fn coverage(&self) -> CoverageAnalyzer<'a> {
        CoverageAnalyzer::new(self.reverse, self.tests, self.config.gap_search_depth)
    }
}

/// One-shot form of [`ImpactAnalyzer::analyze`].
pub fn analyze(
    changed: &ChangedMethodSet,
    graph: &CallGraph,
    reverse: &ReverseCallGraph,
    tests: &TestMethodSet,
    config: &AnalysisConfig,
) -> ImpactReport {
    ImpactAnalyzer::new(graph, reverse, tests, config).analyze(changed)
}
