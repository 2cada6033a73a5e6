//! Commit analysis — one revision in, one CommitImpact out.

pub mod analyzer;
pub mod classifier;
pub mod risk;
pub mod types;

pub use analyzer::CommitAnalyzer;
pub use classifier::CommitClassifier;
pub use risk::commit_risk_score;
pub use types::CommitImpact;
