//! Branch inspection configuration.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

pub const DEFAULT_CACHE_DIR: &str = ".inspect_cache";

/// Which commits of which branch to inspect, and where to memoize results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InspectConfig {
    pub branch: String,
    /// Stop after this many commits.
    pub commits: Option<usize>,
    /// Stop at the first commit older than this date (UTC).
    pub since: Option<NaiveDate>,
    pub cache_dir: PathBuf,
    /// Worker count override. Defaults to available parallelism minus one.
    pub threads: Option<usize>,
}

impl InspectConfig {
    pub fn new(branch: impl Into<String>) -> Self {
        Self {
            branch: branch.into(),
            commits: None,
            since: None,
            cache_dir: PathBuf::from(DEFAULT_CACHE_DIR),
            threads: None,
        }
    }

    pub fn with_commits(mut self, commits: usize) -> Self {
        self.commits = Some(commits);
        self
    }

    pub fn with_since(mut self, since: NaiveDate) -> Self {
        self.since = Some(since);
        self
    }

    pub fn with_cache_dir(mut self, cache_dir: impl Into<PathBuf>) -> Self {
        self.cache_dir = cache_dir.into();
        self
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = Some(threads);
        self
    }

    /// Reject configurations that cannot select a bounded commit set.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.branch.trim().is_empty() {
            return Err(ConfigError::ValidationFailed {
                field: "inspect.branch".to_string(),
                message: "a branch name is required".to_string(),
            });
        }
        if self.commits.is_none() && self.since.is_none() {
            return Err(ConfigError::ValidationFailed {
                field: "inspect.commits".to_string(),
                message: "either a commit count or a since date is required".to_string(),
            });
        }
        if self.commits == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "inspect.commits".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if self.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "inspect.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }
}
