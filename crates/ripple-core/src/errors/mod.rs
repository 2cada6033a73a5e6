//! Error types for Ripple.
//! One error enum per subsystem, aggregated by `PipelineError`.

pub mod config_error;
pub mod error_code;
pub mod history_error;
pub mod parse_error;
pub mod pipeline_error;
pub mod storage_error;

pub use config_error::ConfigError;
pub use error_code::RippleErrorCode;
pub use history_error::HistoryError;
pub use parse_error::ParseError;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use storage_error::StorageError;
