//! CommitImpact — the persisted per-commit record.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use ripple_analysis::graph::test_topology::{CoverageStats, TestGap};
use ripple_core::MethodRef;
use serde::{Deserialize, Serialize};

use crate::history::AuthorInfo;

/// Everything learned about one commit. Built once, cached by commit id,
/// never modified afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitImpact {
    pub commit_id: String,
    pub short_id: String,
    pub message: String,
    pub author: AuthorInfo,
    pub timestamp: DateTime<Utc>,
    /// Source files touched on the new side.
    pub changed_files: usize,
    pub changed_methods: BTreeSet<MethodRef>,
    /// Changed files left out of the graph (unreadable, unparseable, or
    /// over the cap). Never more than `changed_files`.
    pub skipped_files: usize,
    pub impacted_methods: BTreeSet<MethodRef>,
    /// Test owner → test method names.
    pub impacted_tests: BTreeMap<String, BTreeSet<String>>,
    pub test_coverage_gaps: Vec<TestGap>,
    pub coverage: CoverageStats,
    pub risk_score: u32,
    /// Output of registered classifiers, by classifier name.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub classifications: BTreeMap<String, serde_json::Value>,
}

impl CommitImpact {
    pub fn impacted_test_count(&self) -> usize {
        self.impacted_tests.values().map(BTreeSet::len).sum()
    }
}
