//! BranchMonitor — inspect the recent history of a branch.
//!
//! 1. Resolve the branch; failure here ends the run.
//! 2. Select commits by count and/or date.
//! 3. For each commit, in parallel: cache hit, or analyze and store.
//! 4. Collect, drop failures into the report, sort newest first.

use std::sync::Arc;

use ripple_core::config::InspectConfig;
use ripple_core::errors::PipelineError;
use ripple_core::events::{
    CommitAnalyzedEvent, CommitCacheHitEvent, CommitFailedEvent, EventDispatcher,
    InspectionCompleteEvent, InspectionStartedEvent,
};
use ripple_core::traits::{Cancellable, CancellationToken};
use ripple_storage::CommitCache;
use tracing::{error, info, warn};

use crate::commit::{CommitAnalyzer, CommitImpact};
use crate::history::{CommitFilter, CommitMeta};

use super::pool::WorkerPool;
use super::report::{BatchReport, CommitFailure};

enum Outcome {
    Cached(CommitImpact),
    Analyzed(CommitImpact),
}

pub struct BranchMonitor {
    analyzer: Arc<CommitAnalyzer>,
    config: InspectConfig,
    events: EventDispatcher,
    cancel: CancellationToken,
}

impl BranchMonitor {
    pub fn new(analyzer: Arc<CommitAnalyzer>, config: InspectConfig) -> Self {
        Self {
            analyzer,
            config,
            events: EventDispatcher::new(),
            cancel: CancellationToken::new(),
        }
    }

    pub fn with_events(mut self, events: EventDispatcher) -> Self {
        self.events = events;
        self
    }

    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// A handle that stops further commits from starting.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn config(&self) -> &InspectConfig {
        &self.config
    }

    /// Run one inspection. Config, branch resolution, history listing,
    /// cache-open, and pool errors are fatal; per-commit errors are
    /// recorded in the report and the batch goes on.
    pub fn run(&self) -> Result<BatchReport, PipelineError> {
        self.config.validate()?;
        if self.cancel.is_cancelled() {
            return Err(PipelineError::Cancelled);
        }

        let history = self.analyzer.history();
        let head = history.resolve_ref(&self.config.branch)?;
        let filter = CommitFilter::new(self.config.commits, self.config.since);
        let commits = history.list_commits(&head, &filter)?;

        let cache = CommitCache::open(&self.config.cache_dir, self.analyzer.config().fingerprint())?;
        let pool = WorkerPool::new(self.config.threads)?;

        info!(
            branch = %self.config.branch,
            head = %head,
            selected = commits.len(),
            threads = pool.threads(),
            "inspecting branch"
        );
        self.events.emit_inspection_started(&InspectionStartedEvent {
            branch: self.config.branch.clone(),
            commits_selected: commits.len(),
        });

        let outcomes = pool.run_all(&commits, &self.cancel, |commit| {
            self.analyze_cached(&cache, commit)
        });

        let mut report = BatchReport {
            selected: commits.len(),
            ..Default::default()
        };
        for (commit, outcome) in commits.iter().zip(outcomes) {
            match outcome {
                Some(Ok(Outcome::Cached(impact))) => {
                    report.cache_hits += 1;
                    report.impacts.push(impact);
                }
                Some(Ok(Outcome::Analyzed(impact))) => {
                    report.analyzed += 1;
                    report.impacts.push(impact);
                }
                Some(Err(e)) => {
                    error!(commit = %commit.id, error = %e, "commit analysis failed; skipping");
                    self.events.emit_commit_failed(&CommitFailedEvent {
                        commit: commit.id.clone(),
                        error: e.to_string(),
                    });
                    report.failures.push(CommitFailure::from_error(&commit.id, &e));
                }
                None => report.cancelled = true,
            }
        }

        report.impacts.sort_by(|a, b| {
            b.timestamp
                .cmp(&a.timestamp)
                .then_with(|| a.commit_id.cmp(&b.commit_id))
        });

        info!(
            selected = report.selected,
            analyzed = report.analyzed,
            cache_hits = report.cache_hits,
            failed = report.failed(),
            not_run = report.not_run(),
            skipped_fraction = report.skipped_fraction(),
            files_seen = report.files_seen(),
            skipped_files = report.skipped_files(),
            skipped_file_fraction = report.skipped_file_fraction(),
            "inspection complete"
        );
        self.events.emit_inspection_complete(&InspectionCompleteEvent {
            analyzed: report.analyzed,
            cache_hits: report.cache_hits,
            failed: report.failed(),
            cancelled: report.cancelled,
        });
        Ok(report)
    }

    fn analyze_cached(&self, cache: &CommitCache, commit: &CommitMeta) -> Result<Outcome, PipelineError> {
        let cached = cache
            .load::<CommitImpact>(&commit.id)
            .map_err(|e| PipelineError::from(e).for_commit(&commit.id))?;
        if let Some(impact) = cached {
            self.events.emit_cache_hit(&CommitCacheHitEvent {
                commit: commit.id.clone(),
            });
            return Ok(Outcome::Cached(impact));
        }

        let impact = self.analyzer.analyze_commit(commit)?;
        if let Err(e) = cache.store(&commit.id, &impact) {
            warn!(commit = %commit.id, error = %e, "could not cache commit impact");
        }
        self.events.emit_commit_analyzed(&CommitAnalyzedEvent {
            commit: commit.id.clone(),
            changed_methods: impact.changed_methods.len(),
            impacted_methods: impact.impacted_methods.len(),
            risk_score: impact.risk_score,
        });
        Ok(Outcome::Analyzed(impact))
    }
}
