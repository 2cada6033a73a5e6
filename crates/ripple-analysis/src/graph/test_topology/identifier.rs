//! Test method identification by annotation or naming convention.

use ripple_core::MethodRef;

use crate::call_graph::AnalysisUnit;
use crate::source_model::{DeclKind, MethodDecl};

use super::types::TestMethodSet;

/// Annotations that mark a method as a test on their own.
const TEST_ANNOTATIONS: &[&str] = &[
    "Test",
    "ParameterizedTest",
    "RepeatedTest",
    "TestFactory",
    "TestTemplate",
];

/// Recognises test methods in an analysis unit.
#[derive(Debug, Clone, Copy, Default)]
pub struct TestIdentifier;

impl TestIdentifier {
    pub fn new() -> Self {
        Self
    }

    /// Computed once per unit; independent of any change.
    pub fn identify(&self, unit: &AnalysisUnit) -> TestMethodSet {
        unit.files
            .iter()
            .flat_map(|file| file.declarations.iter())
            .filter(|decl| decl.kind == DeclKind::Method && self.is_test(decl))
            .map(|decl| MethodRef::new(&decl.owner_name, &decl.method_name))
            .collect()
    }

    /// A test annotation, or a test-suite owner plus a test-like method name.
    pub fn is_test(&self, decl: &MethodDecl) -> bool {
        if TEST_ANNOTATIONS.iter().any(|a| decl.has_annotation(a)) {
            return true;
        }
        let owner = MethodRef::new(&decl.owner_name, &decl.method_name);
        is_test_suite_name(owner.owner_simple_name()) && is_test_method_name(&decl.method_name)
    }
}

fn is_test_suite_name(simple_owner: &str) -> bool {
    simple_owner.ends_with("Test") || simple_owner.ends_with("Tests") || simple_owner.starts_with("Test")
}

fn is_test_method_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    name.starts_with("test") || lower.contains("should") || lower.contains("when") || lower.contains("given")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source_model::ParsedFile;
    use ripple_core::types::collections::SmallVec2;

    fn decl(owner: &str, name: &str, annotations: &[&str]) -> MethodDecl {
        MethodDecl {
            owner_name: owner.to_string(),
            method_name: name.to_string(),
            start_line: 1,
            end_line: 1,
            kind: DeclKind::Method,
            annotations: annotations.iter().map(|a| a.to_string()).collect::<SmallVec2<_>>(),
            invocation_targets: Vec::new(),
        }
    }

    #[test]
    fn annotation_alone_is_enough() {
        assert!(TestIdentifier.is_test(&decl("a.Checks", "verifies", &["Test"])));
        assert!(TestIdentifier.is_test(&decl("a.Checks", "verifies", &["org.junit.jupiter.params.ParameterizedTest"])));
    }

    #[test]
    fn naming_needs_both_owner_and_method() {
        assert!(TestIdentifier.is_test(&decl("a.OrderServiceTest", "testSave", &[])));
        assert!(TestIdentifier.is_test(&decl("a.OrderTests", "saveShouldPersist", &[])));
        assert!(TestIdentifier.is_test(&decl("a.TestOrders", "givenCart_total", &[])));
        assert!(!TestIdentifier.is_test(&decl("a.OrderServiceTest", "setUp", &[])));
        assert!(!TestIdentifier.is_test(&decl("a.OrderService", "testConnection", &[])));
    }

    #[test]
    fn identify_skips_synthetic_bodies() {
        let mut lambda = decl("a.FooTest", "testX", &[]);
        lambda.kind = DeclKind::Lambda;
        let unit = AnalysisUnit::from_parsed(vec![ParsedFile {
            path: "a/FooTest.java".to_string(),
            declarations: vec![decl("a.FooTest", "testX", &[]), lambda],
            syntax_errors: 0,
        }]);
        let tests = TestIdentifier.identify(&unit);
        assert_eq!(tests.len(), 1);
        assert!(tests.contains(&MethodRef::new("a.FooTest", "testX")));
    }
}
