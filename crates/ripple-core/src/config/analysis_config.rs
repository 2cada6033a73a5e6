//! Analysis configuration — the bounds every impact component receives.

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

pub const DEFAULT_MAX_DEPTH: u32 = 10;
pub const DEFAULT_MAX_FILES: usize = 1000;

/// Bounds for one analysis unit. A plain value, passed explicitly.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Maximum caller hops followed from the changed methods.
    pub max_depth: u32,
    /// Maximum number of source files admitted into one unit.
    pub max_files: usize,
    /// Package-like prefix (`com.acme.order`) restricting which files are read.
    pub scope: String,
    /// Hop limit for the coverage-gap test search. `None` searches all ancestors.
    pub gap_search_depth: Option<u32>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_files: DEFAULT_MAX_FILES,
            scope: String::new(),
            gap_search_depth: None,
        }
    }
}

impl AnalysisConfig {
    pub fn with_max_depth(mut self, max_depth: u32) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_files(mut self, max_files: usize) -> Self {
        self.max_files = max_files;
        self
    }

    pub fn with_scope(mut self, scope: impl Into<String>) -> Self {
        self.scope = scope.into();
        self
    }

    /// The scope rewritten as a path fragment (`com.acme` → `com/acme`).
    pub fn scope_path(&self) -> Option<String> {
        let scope = self.scope.trim();
        if scope.is_empty() {
            None
        } else {
            Some(scope.replace('.', "/"))
        }
    }

    /// Stable hash of every field that influences analysis output.
    /// Cached results produced under a different fingerprint are stale.
    pub fn fingerprint(&self) -> u64 {
        let canonical = format!(
            "max_depth={};max_files={};scope={};gap_search_depth={:?}",
            self.max_depth, self.max_files, self.scope, self.gap_search_depth
        );
        xxh3_64(canonical.as_bytes())
    }
}
