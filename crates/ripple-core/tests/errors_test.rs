//! Tests for error codes and error attribution.

use ripple_core::errors::error_code;
use ripple_core::errors::{
    HistoryError, ParseError, PipelineError, PipelineResult, RippleErrorCode, StorageError,
};

/// Unresolved references carry their own code.
#[test]
fn test_history_error_codes() {
    let unresolved = HistoryError::UnresolvedRef {
        name: "feature/x".to_string(),
        message: "not found".to_string(),
    };
    assert_eq!(unresolved.error_code(), error_code::UNRESOLVED_REF);
    assert!(unresolved.coded_string().starts_with("[UNRESOLVED_REF]"));

    let no_parent = HistoryError::NoParent { id: "abc".to_string() };
    assert_eq!(no_parent.error_code(), error_code::HISTORY_ERROR);
}

/// Wrapping attributes the failure to a commit exactly once.
#[test]
fn test_for_commit_wraps_once() {
    let err: PipelineError = HistoryError::NoParent { id: "abc1234".to_string() }.into();
    let wrapped = err.for_commit("abc1234").for_commit("other");
    assert_eq!(wrapped.commit(), Some("abc1234"));
    assert_eq!(wrapped.error_code(), error_code::COMMIT_FAILED);
    assert!(wrapped.to_string().contains("abc1234"));
}

/// Subsystem codes pass through the aggregate.
#[test]
fn test_pipeline_delegates_codes() {
    let parse: PipelineError = ParseError::UnsupportedLanguage { path: "a.kt".to_string() }.into();
    assert_eq!(parse.error_code(), error_code::UNSUPPORTED_LANGUAGE);
    let storage: PipelineError = StorageError::Io {
        path: "x".to_string(),
        message: "denied".to_string(),
    }
    .into();
    assert_eq!(storage.error_code(), error_code::STORAGE_ERROR);
    assert_eq!(PipelineError::Cancelled.error_code(), error_code::CANCELLED);
}

/// Non-fatal errors accumulate alongside data.
#[test]
fn test_pipeline_result_accumulates() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1]);
    assert!(result.is_clean());
    result.add_error(PipelineError::Cancelled);
    assert_eq!(result.error_count(), 1);
    assert_eq!(result.data, vec![1]);
}
