//! Commit-level risk score.

use ripple_analysis::graph::test_topology::{RiskLevel, TestGap};

/// Path fragments that mark shared code; changing it is riskier.
const SHARED_CODE_MARKERS: &[&str] = &["util", "common"];

/// Change volume, blast radius, missing tests, shared code, and
/// coverage gaps, summed.
pub fn commit_risk_score(
    changed_paths: &[String],
    changed_methods: usize,
    impacted_methods: usize,
    impacted_tests: usize,
    gaps: &[TestGap],
) -> u32 {
    let mut score = changed_paths.len() + changed_methods * 2 + impacted_methods * 3;
    if impacted_tests == 0 {
        score += 10;
    }
    let touches_shared = changed_paths.iter().any(|path| {
        let lower = path.to_lowercase();
        SHARED_CODE_MARKERS.iter().any(|m| lower.contains(m))
    });
    if touches_shared {
        score += 5;
    }
    score += gaps
        .iter()
        .map(|gap| match gap.risk_level {
            RiskLevel::High => 15,
            RiskLevel::Medium => 8,
            RiskLevel::Low => 3,
        })
        .sum::<usize>();
    u32::try_from(score).unwrap_or(u32::MAX)
}
