//! Pipeline errors and non-fatal error collection.

use super::error_code::{self, RippleErrorCode};
use super::{ConfigError, HistoryError, ParseError, StorageError};

/// Errors that can occur during pipeline execution.
/// Aggregates subsystem errors via `From` conversions.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Commit {commit} failed: {source}")]
    Commit {
        commit: String,
        #[source]
        source: Box<PipelineError>,
    },

    #[error("Worker pool error: {message}")]
    WorkerPool { message: String },

    #[error("Pipeline cancelled")]
    Cancelled,
}

impl PipelineError {
    /// Attribute this error to a revision. Already-attributed errors are kept as is.
    pub fn for_commit(self, commit: &str) -> Self {
        match self {
            Self::Commit { .. } => self,
            other => Self::Commit {
                commit: commit.to_string(),
                source: Box::new(other),
            },
        }
    }

    /// The revision this error is attributed to, if any.
    pub fn commit(&self) -> Option<&str> {
        match self {
            Self::Commit { commit, .. } => Some(commit),
            _ => None,
        }
    }
}

impl RippleErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Config(e) => e.error_code(),
            Self::Parse(e) => e.error_code(),
            Self::History(e) => e.error_code(),
            Self::Storage(e) => e.error_code(),
            Self::Commit { .. } => error_code::COMMIT_FAILED,
            Self::WorkerPool { .. } => error_code::PIPELINE_ERROR,
            Self::Cancelled => error_code::CANCELLED,
        }
    }
}

/// Result of a pipeline run that accumulates non-fatal errors.
/// Allows partial results to be returned even when some files fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the pipeline run.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: PipelineError) {
        self.errors.push(error);
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
