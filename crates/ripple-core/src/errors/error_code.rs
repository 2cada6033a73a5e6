//! RippleErrorCode trait for structured error codes.

/// Every error enum implements this to expose a stable code string
/// that report writers and CI integrations can match on.
pub trait RippleErrorCode {
    /// Returns the error code string (e.g., "HISTORY_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const PARSE_ERROR: &str = "PARSE_ERROR";
pub const UNSUPPORTED_LANGUAGE: &str = "UNSUPPORTED_LANGUAGE";
pub const HISTORY_ERROR: &str = "HISTORY_ERROR";
pub const UNRESOLVED_REF: &str = "UNRESOLVED_REF";
pub const STORAGE_ERROR: &str = "STORAGE_ERROR";
pub const COMMIT_FAILED: &str = "COMMIT_FAILED";
pub const CANCELLED: &str = "CANCELLED";
pub const PIPELINE_ERROR: &str = "PIPELINE_ERROR";
