//! Event payloads emitted during a branch inspection.

#[derive(Debug, Clone)]
pub struct InspectionStartedEvent {
    pub branch: String,
    pub commits_selected: usize,
}

#[derive(Debug, Clone)]
pub struct CommitCacheHitEvent {
    pub commit: String,
}

#[derive(Debug, Clone)]
pub struct CommitAnalyzedEvent {
    pub commit: String,
    pub changed_methods: usize,
    pub impacted_methods: usize,
    pub risk_score: u32,
}

#[derive(Debug, Clone)]
pub struct CommitFailedEvent {
    pub commit: String,
    pub error: String,
}

#[derive(Debug, Clone)]
pub struct InspectionCompleteEvent {
    pub analyzed: usize,
    pub cache_hits: usize,
    pub failed: usize,
    pub cancelled: bool,
}
