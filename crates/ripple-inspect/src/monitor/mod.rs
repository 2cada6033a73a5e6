//! Branch monitoring — commit selection, caching, and parallel analysis.

pub mod branch;
pub mod pool;
pub mod report;

pub use branch::BranchMonitor;
pub use pool::WorkerPool;
pub use report::{BatchReport, CommitFailure};
