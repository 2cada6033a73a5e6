//! RevisionHistory trait — what the inspector needs from a repository.

use ripple_core::errors::HistoryError;

use super::types::{CommitFilter, CommitMeta, FileDiff};

/// Read-only access to a repository's history. Shared across worker
/// threads, so implementations must be `Send + Sync`.
pub trait RevisionHistory: Send + Sync {
    /// Resolve a branch, tag, or revision expression to a full commit id.
    fn resolve_ref(&self, name: &str) -> Result<String, HistoryError>;

    /// Commits reachable from `head`, newest first, cut by `filter`.
    fn list_commits(&self, head: &str, filter: &CommitFilter) -> Result<Vec<CommitMeta>, HistoryError>;

    fn commit(&self, id: &str) -> Result<CommitMeta, HistoryError>;

    /// Files changed between two revisions whose new path passes `accept`,
    /// with zero-context hunks. Deleted files are left out.
    fn diff(
        &self,
        from: &str,
        to: &str,
        accept: &dyn Fn(&str) -> bool,
    ) -> Result<Vec<FileDiff>, HistoryError>;

    /// File contents at a revision; `None` when the path does not exist there.
    fn read_file(&self, revision: &str, path: &str) -> Result<Option<Vec<u8>>, HistoryError>;
}
