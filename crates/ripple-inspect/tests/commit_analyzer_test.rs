//! CommitAnalyzer over a real git history.

mod common;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use common::*;
use ripple_analysis::graph::test_topology::RiskLevel;
use ripple_core::config::AnalysisConfig;
use ripple_core::errors::{HistoryError, PipelineError};
use ripple_core::MethodRef;
use ripple_inspect::history::{GitHistory, RevisionHistory};
use ripple_inspect::{CommitClassifier, CommitImpact};

fn sig(s: &str) -> MethodRef {
    MethodRef::from_signature(s)
}

/// Only the changed file is in the graph, so a repository fix reaches no
/// callers and shows up as an untested gap.
#[test]
fn test_repository_change_is_revision_scoped() {
    let h = order_history();
    let analyzer = analyzer(&h.repo, AnalysisConfig::default());
    let git = GitHistory::open(h.repo.path()).unwrap();
    let commit = git.commit(&h.repo_change).unwrap();

    let impact = analyzer.analyze_commit(&commit).unwrap();
    assert_eq!(impact.commit_id, h.repo_change);
    assert_eq!(impact.short_id, &h.repo_change[..7]);
    assert_eq!(impact.message, "Persist a copy of the order");
    assert_eq!(impact.changed_files, 1);
    assert_eq!(
        impact.changed_methods,
        BTreeSet::from([sig("com.acme.repo.OrderRepository.persist")])
    );
    assert!(impact.impacted_methods.is_empty());
    assert!(impact.impacted_tests.is_empty());
    assert_eq!(impact.test_coverage_gaps.len(), 1);
    assert_eq!(impact.test_coverage_gaps[0].risk_level, RiskLevel::Low);
    // 1 file + 2*1 method + 10 untested + 3 low gap
    assert_eq!(impact.risk_score, 16);
}

/// A service change committed with its test is covered.
#[test]
fn test_service_change_with_test() {
    let h = order_history();
    let analyzer = analyzer(&h.repo, AnalysisConfig::default());
    let git = GitHistory::open(h.repo.path()).unwrap();
    let commit = git.commit(&h.service_change).unwrap();

    let impact = analyzer.analyze_commit(&commit).unwrap();
    assert_eq!(impact.changed_files, 2);
    assert_eq!(
        impact.changed_methods,
        BTreeSet::from([
            sig("com.acme.service.OrderService.save"),
            sig("com.acme.service.OrderServiceTest.savesOrder"),
        ])
    );
    assert_eq!(
        impact.impacted_methods,
        BTreeSet::from([sig("com.acme.service.OrderServiceTest.savesOrder")])
    );
    assert_eq!(
        impact.impacted_tests,
        BTreeMap::from([(
            "com.acme.service.OrderServiceTest".to_string(),
            BTreeSet::from(["savesOrder".to_string()])
        )])
    );
    assert!(impact.test_coverage_gaps.is_empty());
    assert_eq!(impact.coverage.business_methods, 1);
    assert_eq!(impact.coverage.covered_methods, 1);
    // 2 files + 2*2 methods + 3*1 impacted
    assert_eq!(impact.risk_score, 9);
}

/// A root commit has nothing to diff against; the error names the commit.
#[test]
fn test_root_commit_fails_with_attribution() {
    let h = order_history();
    let analyzer = analyzer(&h.repo, AnalysisConfig::default());
    let git = GitHistory::open(h.repo.path()).unwrap();
    let commit = git.commit(&h.root).unwrap();

    let err = analyzer.analyze_commit(&commit).unwrap_err();
    assert_eq!(err.commit(), Some(h.root.as_str()));
    match err {
        PipelineError::Commit { source, .. } => {
            assert!(matches!(*source, PipelineError::History(HistoryError::NoParent { .. })));
        }
        other => panic!("unexpected error: {other}"),
    }
}

/// A range spanning several commits is analyzed as one change.
#[test]
fn test_analyze_range_against_baseline() {
    let h = order_history();
    let analyzer = analyzer(&h.repo, AnalysisConfig::default());

    let impact = analyzer.analyze_range(&h.root, "HEAD").unwrap();
    assert_eq!(impact.commit_id, h.service_change);
    assert_eq!(impact.changed_files, 3);
    assert_eq!(impact.changed_methods.len(), 3);
    assert_eq!(
        impact.impacted_methods,
        BTreeSet::from([
            sig("com.acme.service.OrderService.save"),
            sig("com.acme.service.OrderServiceTest.savesOrder"),
        ])
    );
    assert!(impact.test_coverage_gaps.is_empty());
    assert_eq!(impact.coverage.covered_methods, 2);
}

/// An unknown baseline is attributed to the target revision.
#[test]
fn test_analyze_range_unknown_baseline() {
    let h = order_history();
    let analyzer = analyzer(&h.repo, AnalysisConfig::default());
    let err = analyzer.analyze_range("v9.9", "HEAD").unwrap_err();
    assert_eq!(err.commit(), Some("HEAD"));
}

struct SizeClassifier;

impl CommitClassifier for SizeClassifier {
    fn name(&self) -> &str {
        "size"
    }

    fn classify(&self, impact: &CommitImpact) -> Option<serde_json::Value> {
        let label = if impact.changed_files > 1 { "multi-file" } else { "single-file" };
        Some(serde_json::json!({ "label": label, "files": impact.changed_files }))
    }
}

struct NeverClassifier;

impl CommitClassifier for NeverClassifier {
    fn name(&self) -> &str {
        "never"
    }

    fn classify(&self, _impact: &CommitImpact) -> Option<serde_json::Value> {
        None
    }
}

/// Classifier verdicts land under their names; `None` adds nothing.
#[test]
fn test_classifiers() {
    let h = order_history();
    let analyzer = analyzer(&h.repo, AnalysisConfig::default())
        .with_classifier(Arc::new(SizeClassifier))
        .with_classifier(Arc::new(NeverClassifier));
    let git = GitHistory::open(h.repo.path()).unwrap();
    let commit = git.commit(&h.service_change).unwrap();

    let impact = analyzer.analyze_commit(&commit).unwrap();
    assert_eq!(impact.classifications.len(), 1);
    assert_eq!(impact.classifications["size"]["label"], "multi-file");
    assert_eq!(impact.classifications["size"]["files"], 2);
}
