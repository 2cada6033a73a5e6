//! EventDispatcher — synchronous event dispatch with zero overhead when empty.

use std::sync::Arc;

use super::handler::InspectEventHandler;
use super::types::*;

/// Synchronous dispatcher over a list of handlers.
#[derive(Default, Clone)]
pub struct EventDispatcher {
    handlers: Vec<Arc<dyn InspectEventHandler>>,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    pub fn register(&mut self, handler: Arc<dyn InspectEventHandler>) {
        self.handlers.push(handler);
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    /// A panicking handler does not stop delivery to the others.
    fn emit<F: Fn(&dyn InspectEventHandler)>(&self, f: F) {
        for handler in &self.handlers {
            let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                f(handler.as_ref());
            }));
            if result.is_err() {
                ::tracing::warn!("inspection event handler panicked");
            }
        }
    }

    pub fn emit_inspection_started(&self, event: &InspectionStartedEvent) {
        self.emit(|h| h.on_inspection_started(event));
    }

    pub fn emit_cache_hit(&self, event: &CommitCacheHitEvent) {
        self.emit(|h| h.on_cache_hit(event));
    }

    pub fn emit_commit_analyzed(&self, event: &CommitAnalyzedEvent) {
        self.emit(|h| h.on_commit_analyzed(event));
    }

    pub fn emit_commit_failed(&self, event: &CommitFailedEvent) {
        self.emit(|h| h.on_commit_failed(event));
    }

    pub fn emit_inspection_complete(&self, event: &InspectionCompleteEvent) {
        self.emit(|h| h.on_inspection_complete(event));
    }
}

impl std::fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
