//! BatchReport — the outcome of one branch inspection.

use ripple_core::errors::{PipelineError, RippleErrorCode};

use crate::commit::CommitImpact;

/// A commit that produced no impact record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitFailure {
    pub commit: String,
    /// Code of the underlying error, not of the per-commit wrapper.
    pub code: &'static str,
    pub message: String,
}

impl CommitFailure {
    pub fn from_error(commit: &str, error: &PipelineError) -> Self {
        let code = match error {
            PipelineError::Commit { source, .. } => source.error_code(),
            other => other.error_code(),
        };
        Self {
            commit: commit.to_string(),
            code,
            message: error.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BatchReport {
    /// Newest first; ties broken by commit id.
    pub impacts: Vec<CommitImpact>,
    pub failures: Vec<CommitFailure>,
    /// Commits picked by the branch filter.
    pub selected: usize,
    /// Commits computed in this run.
    pub analyzed: usize,
    /// Commits served from the cache.
    pub cache_hits: usize,
    /// Cancellation stopped some commits from running.
    pub cancelled: bool,
}

impl BatchReport {
    pub fn failed(&self) -> usize {
        self.failures.len()
    }

    /// Commits never attempted because the batch was cancelled.
    pub fn not_run(&self) -> usize {
        self.selected
            .saturating_sub(self.analyzed + self.cache_hits + self.failed())
    }

    /// Share of selected commits with no impact record.
    pub fn skipped_fraction(&self) -> f64 {
        if self.selected == 0 {
            return 0.0;
        }
        self.selected.saturating_sub(self.impacts.len()) as f64 / self.selected as f64
    }

    /// Changed files that never made it into a graph, over all impacts.
    pub fn skipped_files(&self) -> usize {
        self.impacts.iter().map(|i| i.skipped_files).sum()
    }

    /// Changed source files seen, over all impacts.
    pub fn files_seen(&self) -> usize {
        self.impacts.iter().map(|i| i.changed_files).sum()
    }

    /// Share of changed source files left out of a graph.
    pub fn skipped_file_fraction(&self) -> f64 {
        match self.files_seen() {
            0 => 0.0,
            seen => self.skipped_files() as f64 / seen as f64,
        }
    }
}
