//! InspectEventHandler trait, all methods with no-op defaults.

use super::types::*;

/// Handlers override only the events they care about. `Send + Sync`
/// because events fire from worker threads.
pub trait InspectEventHandler: Send + Sync {
    fn on_inspection_started(&self, _event: &InspectionStartedEvent) {}
    fn on_cache_hit(&self, _event: &CommitCacheHitEvent) {}
    fn on_commit_analyzed(&self, _event: &CommitAnalyzedEvent) {}
    fn on_commit_failed(&self, _event: &CommitFailedEvent) {}
    fn on_inspection_complete(&self, _event: &InspectionCompleteEvent) {}
}
