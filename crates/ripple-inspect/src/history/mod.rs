//! Revision history — the repository as seen by the inspector.

pub mod git;
pub mod traits;
pub mod types;

pub use git::GitHistory;
pub use traits::RevisionHistory;
pub use types::{AuthorInfo, ChangeKind, CommitFilter, CommitMeta, DiffHunk, FileDiff};
