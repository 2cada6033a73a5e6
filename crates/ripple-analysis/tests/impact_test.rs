//! Impact analysis: impacted tests, coverage gaps, and determinism.

use std::collections::BTreeSet;

use proptest::prelude::*;

use ripple_analysis::call_graph::{reverse, CallGraph};
use ripple_analysis::graph::impact::{analyze, ChangedMethodSet, ImpactAnalyzer};
use ripple_analysis::graph::test_topology::{RiskLevel, TestMethodSet};
use ripple_core::config::AnalysisConfig;
use ripple_core::MethodRef;

fn sig(s: &str) -> MethodRef {
    MethodRef::from_signature(s)
}

fn changed(sigs: &[&str]) -> ChangedMethodSet {
    sigs.iter().map(|s| sig(s)).collect()
}

/// A test calling a changed method is listed under its owner.
#[test]
fn test_direct_test_caller_is_impacted() {
    let t1 = sig("com.acme.service.OrderServiceTest.savesOrder");
    let save = sig("com.acme.service.OrderService.save");
    let graph = CallGraph::from_edges([&t1, &save], [(&t1, &save)]);
    let rev = reverse(&graph);
    let tests: TestMethodSet = [t1.clone()].into_iter().collect();

    let report = analyze(&changed(&["com.acme.service.OrderService.save"]), &graph, &rev, &tests, &AnalysisConfig::default());

    let owner_tests = report
        .result
        .impacted_tests_by_owner
        .get("com.acme.service.OrderServiceTest")
        .unwrap();
    assert!(owner_tests.contains("savesOrder"));
    assert!(report.result.impacted_methods.contains(&t1));
    assert!(report.gaps.is_empty());
    assert_eq!(report.coverage.covered_methods, 1);
}

/// Direct test callers survive a zero depth bound.
#[test]
fn test_direct_test_caller_survives_zero_depth() {
    let t1 = sig("a.FooTest.testFoo");
    let foo = sig("a.Foo.run");
    let graph = CallGraph::from_edges([&t1, &foo], [(&t1, &foo)]);
    let rev = reverse(&graph);
    let tests: TestMethodSet = [t1.clone()].into_iter().collect();
    let config = AnalysisConfig::default().with_max_depth(0);

    let result = ImpactAnalyzer::new(&graph, &rev, &tests, &config).impact(&changed(&["a.Foo.run"]));
    assert!(result.impacted_methods.is_empty());
    assert_eq!(result.impacted_test_count(), 1);
}

/// Six untested callers on a service method make a HIGH gap.
#[test]
fn test_uncovered_service_method_is_high_risk() {
    let save = sig("com.acme.service.OrderService.save");
    let callers: Vec<MethodRef> = (0..6)
        .map(|i| sig(&format!("com.acme.web.Endpoint{i}.handle")))
        .collect();
    let graph = CallGraph::from_edges(
        std::iter::once(&save).chain(&callers),
        callers.iter().map(|c| (c, &save)),
    );
    let rev = reverse(&graph);
    let tests = TestMethodSet::default();

    let report = analyze(&changed(&["com.acme.service.OrderService.save"]), &graph, &rev, &tests, &AnalysisConfig::default());

    let first = &report.gaps[0];
    assert_eq!(first.method, save);
    assert_eq!(first.risk_level, RiskLevel::High);
    assert!(first.risk_score >= 9);
    assert_eq!(first.impacted_callers.len(), 6);
    assert_eq!(report.gaps.len(), 7);
    assert_eq!(report.coverage.business_methods, 7);
    assert_eq!(report.coverage.covered_methods, 0);
}

/// Gaps come out ordered by level, then caller count.
#[test]
fn test_gap_ordering() {
    let core = sig("com.acme.core.PricingEngine.calculate");
    let api = sig("com.acme.api.Prices.list");
    let leaf = sig("com.acme.model.Price.amount");
    let a = sig("com.acme.model.Cart.total");
    let b = sig("com.acme.model.Basket.total");
    let graph = CallGraph::from_edges(
        [&core, &api, &leaf, &a, &b],
        [(&api, &core), (&a, &leaf), (&b, &leaf), (&api, &leaf)],
    );
    let rev = reverse(&graph);
    let tests = TestMethodSet::default();

    let report = analyze(
        &changed(&["com.acme.core.PricingEngine.calculate", "com.acme.model.Price.amount"]),
        &graph,
        &rev,
        &tests,
        &AnalysisConfig::default(),
    );

    let levels: Vec<RiskLevel> = report.gaps.iter().map(|g| g.risk_level).collect();
    let mut sorted = levels.clone();
    sorted.sort_by(|x, y| y.cmp(x));
    assert_eq!(levels, sorted);
    assert_eq!(report.gaps[0].method, core);

    let leaf_gap = report.gaps.iter().find(|g| g.method == leaf).unwrap();
    assert_eq!(leaf_gap.impacted_callers.len(), 3);
}

/// Tests, accessors, and framework owners are never gaps.
#[test]
fn test_non_business_methods_are_filtered() {
    let getter = sig("com.acme.model.Order.getTotal");
    let test = sig("com.acme.model.OrderTest.testTotal");
    let util = sig("com.acme.util.Money.round");
    let graph = CallGraph::from_edges([&getter, &test, &util], [(&test, &util)]);
    let rev = reverse(&graph);
    let tests: TestMethodSet = [test.clone()].into_iter().collect();

    let report = analyze(
        &changed(&["com.acme.model.Order.getTotal", "com.acme.util.Money.round"]),
        &graph,
        &rev,
        &tests,
        &AnalysisConfig::default(),
    );
    assert!(report.gaps.is_empty());
    assert_eq!(report.coverage.business_methods, 0);
    assert_eq!(report.coverage.coverage_rate(), 1.0);
}

/// A bounded gap search misses tests beyond the bound.
#[test]
fn test_gap_search_depth_bound() {
    let t = sig("com.acme.FlowTest.testFlow");
    let mid = sig("com.acme.Flow.step");
    let target = sig("com.acme.Flow.apply");
    let graph = CallGraph::from_edges([&t, &mid, &target], [(&t, &mid), (&mid, &target)]);
    let rev = reverse(&graph);
    let tests: TestMethodSet = [t.clone()].into_iter().collect();

    let unbounded = AnalysisConfig::default();
    let analyzer = ImpactAnalyzer::new(&graph, &rev, &tests, &unbounded);
    assert_eq!(analyzer.related_tests(&target), BTreeSet::from([t.clone()]));

    let bounded = AnalysisConfig {
        gap_search_depth: Some(1),
        ..AnalysisConfig::default()
    };
    let analyzer = ImpactAnalyzer::new(&graph, &rev, &tests, &bounded);
    assert!(analyzer.related_tests(&target).is_empty());
    assert_eq!(analyzer.all_callers(&target), BTreeSet::from([t, mid.clone()]));
    assert_eq!(analyzer.direct_callers(&target), BTreeSet::from([mid.clone()]));
    assert_eq!(analyzer.direct_callees(&mid), BTreeSet::from([target]));
}

fn graph_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..16).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..48)))
}

fn method(i: usize) -> MethodRef {
    sig(&format!("com.acme.service.S{}.process{}", i % 4, i))
}

proptest! {
    /// Two runs over independently built graphs agree exactly, gap order
    /// and serialized form included.
    #[test]
    fn prop_analysis_is_idempotent(
        (n, edges) in graph_strategy(),
        test_mask in any::<u16>(),
        seed_mask in any::<u16>(),
        max_depth in 0u32..8,
    ) {
        let methods: Vec<MethodRef> = (0..n).map(method).collect();
        let tests: TestMethodSet = (0..n)
            .filter(|&i| test_mask & (1 << i) != 0)
            .map(method)
            .collect();
        let seeds: ChangedMethodSet = (0..n)
            .filter(|&i| seed_mask & (1 << i) != 0)
            .map(method)
            .collect();
        let config = AnalysisConfig::default().with_max_depth(max_depth);

        let run = || {
            let graph = CallGraph::from_edges(
                methods.iter(),
                edges.iter().map(|&(a, b)| (&methods[a], &methods[b])),
            );
            let rev = reverse(&graph);
            analyze(&seeds, &graph, &rev, &tests, &config)
        };
        let first = run();
        let second = run();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }
}
