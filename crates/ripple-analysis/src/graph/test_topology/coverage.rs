//! Coverage-gap analysis: business methods touched by a change that no
//! test reaches, scored by how much depends on them.

use std::collections::BTreeSet;

use ripple_core::MethodRef;

use crate::call_graph::{is_synthetic, transitive_callers, ReverseCallGraph, UNBOUNDED};

use super::types::{CoverageStats, RiskLevel, TestGap, TestMethodSet};

/// Owner prefixes of framework and JDK code.
const FRAMEWORK_PREFIXES: &[&str] = &[
    "java.",
    "javax.",
    "jakarta.",
    "org.springframework.",
    "org.junit.",
    "org.mockito.",
];

const OBJECT_METHODS: &[&str] = &["toString", "hashCode", "equals"];
const UTILITY_SUFFIXES: &[&str] = &["Util", "Utils", "Helper"];
const ACCESSOR_PREFIXES: &[&str] = &["get", "set", "is"];

const PUBLIC_API_MARKERS: &[&str] = &[".controller.", ".api.", ".rest.", ".web."];
const BUSINESS_MARKERS: &[&str] = &[".service.", ".business."];
const BUSINESS_VERBS: &[&str] = &["process", "calculate", "validate", "transform"];
const CORE_MARKERS: &[&str] = &[".core.", ".main."];
const CORE_SUFFIXES: &[&str] = &["Service", "Manager", "Engine"];
const ENTRY_MARKERS: &[&str] = &[".controller.", ".api."];
const MUTATING_VERBS: &[&str] = &["save", "update", "delete", "create"];
const HANDLER_VERBS: &[&str] = &["process", "execute", "handle"];

/// Finds and scores coverage gaps over one reverse graph and test set.
pub struct CoverageAnalyzer<'a> {
    reverse: &'a ReverseCallGraph,
    tests: &'a TestMethodSet,
    search_depth: u32,
}

impl<'a> CoverageAnalyzer<'a> {
    /// `search_depth` bounds the test search; `None` follows every ancestor.
    pub fn new(reverse: &'a ReverseCallGraph, tests: &'a TestMethodSet, search_depth: Option<u32>) -> Self {
        Self {
            reverse,
            tests,
            search_depth: search_depth.unwrap_or(UNBOUNDED),
        }
    }

    /// Gaps among `changed ∪ impacted`, sorted by risk level, then caller
    /// count (both descending), then method.
    pub fn analyze(
        &self,
        changed: &BTreeSet<MethodRef>,
        impacted: &BTreeSet<MethodRef>,
    ) -> (Vec<TestGap>, CoverageStats) {
        let business: BTreeSet<&MethodRef> = changed
            .iter()
            .chain(impacted)
            .filter(|m| self.is_business_method(m))
            .collect();

        let mut stats = CoverageStats {
            business_methods: business.len(),
            ..Default::default()
        };
        let mut gaps = Vec::new();

        for method in business {
            if !self.related_tests(method).is_empty() {
                stats.covered_methods += 1;
                continue;
            }
            let gap = self.gap_for(method);
            match gap.risk_level {
                RiskLevel::High => stats.high_risk_gaps += 1,
                RiskLevel::Medium => stats.medium_risk_gaps += 1,
                RiskLevel::Low => stats.low_risk_gaps += 1,
            }
            gaps.push(gap);
        }

        gaps.sort_by(|a, b| {
            b.risk_level
                .cmp(&a.risk_level)
                .then_with(|| b.impacted_callers.len().cmp(&a.impacted_callers.len()))
                .then_with(|| a.method.cmp(&b.method))
        });
        (gaps, stats)
    }

    /// Tests among the callers of `method`, within the search depth.
    pub fn related_tests(&self, method: &MethodRef) -> BTreeSet<MethodRef> {
        transitive_callers([method], self.reverse, self.search_depth)
            .into_iter()
            .filter(|caller| self.tests.contains(caller))
            .collect()
    }

    /// Not a test, not framework code, not a utility, not an accessor, and
    /// not a closure or anonymous-class body; those are covered through the
    /// named method that encloses them.
    pub fn is_business_method(&self, method: &MethodRef) -> bool {
        !self.tests.contains(method)
            && !is_synthetic(method)
            && !is_framework_method(method)
            && !is_utility_method(method)
            && !is_accessor(method.method())
    }

    fn gap_for(&self, method: &MethodRef) -> TestGap {
        let impacted_callers: BTreeSet<MethodRef> = self.reverse.callers(method).cloned().collect();
        let score = risk_score(method, impacted_callers.len());
        TestGap {
            method: method.clone(),
            risk_level: RiskLevel::from_score(score),
            risk_score: score,
            reason: gap_reason(method, impacted_callers.len()),
            impacted_callers,
        }
    }
}

/// Additive risk score for an uncovered method with `callers` direct callers.
pub fn risk_score(method: &MethodRef, callers: usize) -> u32 {
    let owner = method.owner();
    let name = method.method();

    let mut score = match callers {
        n if n >= 5 => 3,
        n if n >= 2 => 2,
        _ => 1,
    };
    if is_public_api(method) {
        score += 2;
    }
    if is_business_logic(method) {
        score += 2;
    }
    if is_core_service(method) {
        score += 3;
    }
    if contains_any(owner, BUSINESS_MARKERS) {
        score += 2;
    }
    if contains_any(owner, CORE_MARKERS) {
        score += 2;
    }
    if contains_any(owner, ENTRY_MARKERS) {
        score += 1;
    }
    if starts_with_any(name, MUTATING_VERBS) {
        score += 2;
    }
    if starts_with_any(name, HANDLER_VERBS) {
        score += 1;
    }
    score
}

fn gap_reason(method: &MethodRef, callers: usize) -> String {
    let mut reason = format!(
        "missing test coverage, affects {callers} caller{}",
        if callers == 1 { "" } else { "s" }
    );
    if is_public_api(method) {
        reason.push_str(", public API method");
    }
    if is_business_logic(method) {
        reason.push_str(", contains business logic");
    }
    if is_core_service(method) {
        reason.push_str(", core service method");
    }
    reason
}

fn is_public_api(method: &MethodRef) -> bool {
    contains_any(method.owner(), PUBLIC_API_MARKERS)
}

fn is_business_logic(method: &MethodRef) -> bool {
    contains_any(method.owner(), BUSINESS_MARKERS) || starts_with_any(method.method(), BUSINESS_VERBS)
}

fn is_core_service(method: &MethodRef) -> bool {
    contains_any(method.owner(), CORE_MARKERS)
        || CORE_SUFFIXES.iter().any(|s| method.owner().ends_with(s))
}

fn is_framework_method(method: &MethodRef) -> bool {
    FRAMEWORK_PREFIXES.iter().any(|p| method.owner().starts_with(p))
}

fn is_utility_method(method: &MethodRef) -> bool {
    method.owner().contains(".util.")
        || UTILITY_SUFFIXES.iter().any(|s| method.owner().ends_with(s))
        || OBJECT_METHODS.contains(&method.method())
}

/// `getTotal`, `setName`, `isOpen`; not `issue` or `settle`.
fn is_accessor(name: &str) -> bool {
    ACCESSOR_PREFIXES.iter().any(|prefix| {
        name.strip_prefix(prefix)
            .and_then(|rest| rest.chars().next())
            .is_some_and(|c| c.is_ascii_uppercase())
    })
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn starts_with_any(haystack: &str, prefixes: &[&str]) -> bool {
    prefixes.iter().any(|p| haystack.starts_with(p))
}
