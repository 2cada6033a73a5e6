//! # ripple-inspect
//!
//! Walks a branch's history and runs the impact engine on each commit.
//!
//! [`RevisionHistory`] abstracts the repository; [`GitHistory`] is the git
//! implementation. [`CommitAnalyzer`] turns one commit into a
//! [`CommitImpact`]. [`BranchMonitor`] selects commits, consults the
//! commit cache, and fans the misses out over a [`WorkerPool`].

pub mod commit;
pub mod history;
pub mod monitor;

pub use commit::{CommitAnalyzer, CommitClassifier, CommitImpact};
pub use history::{CommitFilter, CommitMeta, FileDiff, GitHistory, RevisionHistory};
pub use monitor::{BatchReport, BranchMonitor, CommitFailure, WorkerPool};
