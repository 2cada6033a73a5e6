//! Impact analysis types.

use std::collections::{BTreeMap, BTreeSet};

use ripple_core::MethodRef;
use serde::{Deserialize, Serialize};

use crate::graph::test_topology::{CoverageStats, TestGap};

/// Methods whose body intersects a changed hunk. The traversal seeds.
pub type ChangedMethodSet = BTreeSet<MethodRef>;

/// Callers reached from a change, and the tests among them grouped by owner.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactResult {
    pub impacted_methods: BTreeSet<MethodRef>,
    /// Test owner → test method names.
    pub impacted_tests_by_owner: BTreeMap<String, BTreeSet<String>>,
}

impl ImpactResult {
    pub fn impacted_test_count(&self) -> usize {
        self.impacted_tests_by_owner.values().map(BTreeSet::len).sum()
    }
}

/// Full output of one impact analysis.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImpactReport {
    pub result: ImpactResult,
    pub gaps: Vec<TestGap>,
    pub coverage: CoverageStats,
}

/// An inclusive, 1-based line range on the new side of a diff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// From a hunk's new-side start and length. A pure deletion
    /// (`new_len == 0`) becomes the single line it follows.
    pub fn from_hunk(new_start: u32, new_len: u32) -> Self {
        let start = new_start.max(1);
        let end = if new_len == 0 { start } else { start + new_len - 1 };
        Self { start, end }
    }
}

/// Changed line ranges of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineChanges {
    pub path: String,
    pub ranges: Vec<LineRange>,
}
