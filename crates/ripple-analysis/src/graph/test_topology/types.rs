//! Test topology types.

use std::collections::BTreeSet;

use ripple_core::types::collections::FxHashSet;
use ripple_core::MethodRef;
use serde::{Deserialize, Serialize};

/// Methods recognised as tests within one analysis unit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TestMethodSet {
    methods: FxHashSet<MethodRef>,
}

impl TestMethodSet {
    pub fn contains(&self, method: &MethodRef) -> bool {
        self.methods.contains(method)
    }

    pub fn len(&self) -> usize {
        self.methods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &MethodRef> {
        self.methods.iter()
    }
}

impl FromIterator<MethodRef> for TestMethodSet {
    fn from_iter<I: IntoIterator<Item = MethodRef>>(iter: I) -> Self {
        Self {
            methods: iter.into_iter().collect(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    /// ≥7 HIGH, ≥4 MEDIUM, else LOW.
    pub fn from_score(score: u32) -> Self {
        match score {
            s if s >= 7 => Self::High,
            s if s >= 4 => Self::Medium,
            _ => Self::Low,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        }
    }
}

/// A business method reachable from a change that no test reaches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestGap {
    pub method: MethodRef,
    pub risk_level: RiskLevel,
    pub risk_score: u32,
    /// Direct callers of `method`.
    pub impacted_callers: BTreeSet<MethodRef>,
    pub reason: String,
}

/// Coverage of the business methods touched by one change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoverageStats {
    pub business_methods: usize,
    pub covered_methods: usize,
    pub high_risk_gaps: usize,
    pub medium_risk_gaps: usize,
    pub low_risk_gaps: usize,
}

impl CoverageStats {
    pub fn gap_count(&self) -> usize {
        self.high_risk_gaps + self.medium_risk_gaps + self.low_risk_gaps
    }

    /// Covered over business methods; 1.0 when nothing needed covering.
    pub fn coverage_rate(&self) -> f64 {
        if self.business_methods == 0 {
            1.0
        } else {
            self.covered_methods as f64 / self.business_methods as f64
        }
    }
}
