//! Revision history errors.

use super::error_code::{self, RippleErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum HistoryError {
    #[error("Cannot open repository at {path}: {message}")]
    RepositoryOpen { path: String, message: String },

    #[error("Cannot resolve reference '{name}': {message}")]
    UnresolvedRef { name: String, message: String },

    #[error("Commit not found: {id}")]
    CommitNotFound { id: String },

    #[error("Commit {id} has no parent to diff against")]
    NoParent { id: String },

    #[error("Diff {from}..{to} failed: {message}")]
    Diff {
        from: String,
        to: String,
        message: String,
    },

    #[error("Cannot read {path} at {revision}: {message}")]
    ReadFile {
        revision: String,
        path: String,
        message: String,
    },

    #[error("History walk failed: {message}")]
    Walk { message: String },
}

impl RippleErrorCode for HistoryError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::UnresolvedRef { .. } => error_code::UNRESOLVED_REF,
            _ => error_code::HISTORY_ERROR,
        }
    }
}
