//! Commit cache storage errors.

use super::error_code::{self, RippleErrorCode};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Cache I/O error at {path}: {message}")]
    Io { path: String, message: String },

    #[error("Cannot serialize cache entry {path}: {message}")]
    Serialize { path: String, message: String },

    #[error("Corrupt cache entry {path}: {message}")]
    Corrupt { path: String, message: String },
}

impl RippleErrorCode for StorageError {
    fn error_code(&self) -> &'static str {
        error_code::STORAGE_ERROR
    }
}
