//! CommitClassifier — pluggable secondary classification of a commit.

use super::types::CommitImpact;

/// Attaches a named, free-form verdict to each analyzed commit
/// (change type, owning team, release note category).
pub trait CommitClassifier: Send + Sync {
    /// Key under which the verdict is stored in `CommitImpact::classifications`.
    fn name(&self) -> &str;

    /// `None` leaves the commit unclassified by this classifier.
    fn classify(&self, impact: &CommitImpact) -> Option<serde_json::Value>;
}
