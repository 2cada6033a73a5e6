//! Cache document and summary types.

use serde::{Deserialize, Serialize};

/// What lands in `impact.json`. The header fields decide whether the
/// entry may be reused.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDocument<T> {
    /// `AnalysisConfig` fingerprint, 16 hex digits.
    pub fingerprint: String,
    /// Full commit id. Guards against short-hash collisions.
    pub commit: String,
    pub impact: T,
}

impl<T> CacheDocument<T> {
    pub fn new(fingerprint: u64, commit: impl Into<String>, impact: T) -> Self {
        Self {
            fingerprint: format_fingerprint(fingerprint),
            commit: commit.into(),
            impact,
        }
    }
}

/// Entry count and on-disk size of a cache directory.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheInfo {
    pub entries: usize,
    pub total_bytes: u64,
}

pub(crate) fn format_fingerprint(fingerprint: u64) -> String {
    format!("{fingerprint:016x}")
}
