//! CommitAnalyzer — diff a revision against its parent, build a graph over
//! the changed files, and run impact analysis on the touched methods.

use std::collections::BTreeMap;
use std::sync::Arc;

use ripple_analysis::call_graph::AnalysisUnit;
use ripple_analysis::graph::impact::{
    ChangedMethodSet, ImpactReport, LineChanges, LineRange, PreparedUnit,
};
use ripple_analysis::source_model::{SourceFile, SourceModel};
use ripple_core::config::AnalysisConfig;
use ripple_core::errors::{HistoryError, PipelineError};
use tracing::{debug, warn};

use crate::history::{CommitMeta, FileDiff, RevisionHistory};

use super::classifier::CommitClassifier;
use super::risk::commit_risk_score;
use super::types::CommitImpact;

const SHORT_ID_LEN: usize = 7;

/// Stateless between calls: every commit gets its own unit, graph, and
/// reverse graph, so one analyzer serves many worker threads.
pub struct CommitAnalyzer {
    history: Arc<dyn RevisionHistory>,
    model: Arc<dyn SourceModel>,
    config: AnalysisConfig,
    classifiers: Vec<Arc<dyn CommitClassifier>>,
}

/// Impact of one revision pair, before it is tied to a commit identity.
struct RangeAnalysis {
    changed_paths: Vec<String>,
    skipped_files: usize,
    changed: ChangedMethodSet,
    report: ImpactReport,
}

impl CommitAnalyzer {
    pub fn new(
        history: Arc<dyn RevisionHistory>,
        model: Arc<dyn SourceModel>,
        config: AnalysisConfig,
    ) -> Self {
        Self {
            history,
            model,
            config,
            classifiers: Vec::new(),
        }
    }

    pub fn with_classifier(mut self, classifier: Arc<dyn CommitClassifier>) -> Self {
        self.classifiers.push(classifier);
        self
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn history(&self) -> &dyn RevisionHistory {
        self.history.as_ref()
    }

    /// Analyze `commit` against its first parent. Every failure comes back
    /// attributed to the commit id; a root commit fails with `NoParent`.
    pub fn analyze_commit(&self, commit: &CommitMeta) -> Result<CommitImpact, PipelineError> {
        let run = || -> Result<CommitImpact, PipelineError> {
            let parent = commit.first_parent().ok_or_else(|| HistoryError::NoParent {
                id: commit.id.clone(),
            })?;
            let analysis = self.analyze_between(parent, &commit.id)?;
            Ok(self.assemble(commit, analysis))
        };
        run().map_err(|e| e.for_commit(&commit.id))
    }

    /// Analyze the change from `from` to `to` as if it were one commit,
    /// reported under `to`'s identity. Useful against a baseline revision.
    pub fn analyze_range(&self, from: &str, to: &str) -> Result<CommitImpact, PipelineError> {
        let run = || -> Result<CommitImpact, PipelineError> {
            let from = self.history.resolve_ref(from)?;
            let to = self.history.resolve_ref(to)?;
            let commit = self.history.commit(&to)?;
            let analysis = self.analyze_between(&from, &to)?;
            Ok(self.assemble(&commit, analysis))
        };
        run().map_err(|e| e.for_commit(to))
    }

    fn analyze_between(&self, from: &str, to: &str) -> Result<RangeAnalysis, PipelineError> {
        let model = self.model.as_ref();
        let diffs = self.history.diff(from, to, &|path: &str| model.supports(path))?;

        let mut sources = Vec::with_capacity(diffs.len());
        let mut missing = 0;
        for diff in &diffs {
            match self.history.read_file(to, &diff.path)? {
                Some(content) => sources.push(SourceFile::new(diff.path.clone(), content)),
                None => {
                    warn!(revision = to, path = %diff.path, "changed file missing at revision");
                    missing += 1;
                }
            }
        }

        let loaded = AnalysisUnit::load(sources, model, &self.config);
        let unit = loaded.data;
        let skipped_files = missing + unit.skipped + unit.truncated;

        let prepared = PreparedUnit::prepare(&unit);
        let changed = prepared.changed_methods(&line_changes(&diffs));
        let report = prepared.analyzer(&self.config).analyze(&changed);

        debug!(
            from,
            to,
            files = diffs.len(),
            methods = prepared.build.stats.total_methods,
            edges = prepared.build.stats.total_edges,
            changed = changed.len(),
            impacted = report.result.impacted_methods.len(),
            "revision analyzed"
        );

        Ok(RangeAnalysis {
            changed_paths: diffs.into_iter().map(|d| d.path).collect(),
            skipped_files,
            changed,
            report,
        })
    }

    fn assemble(&self, commit: &CommitMeta, analysis: RangeAnalysis) -> CommitImpact {
        let RangeAnalysis {
            changed_paths,
            skipped_files,
            changed,
            report,
        } = analysis;
        let risk_score = commit_risk_score(
            &changed_paths,
            changed.len(),
            report.result.impacted_methods.len(),
            report.result.impacted_test_count(),
            &report.gaps,
        );
        let mut impact = CommitImpact {
            commit_id: commit.id.clone(),
            short_id: commit.id.chars().take(SHORT_ID_LEN).collect(),
            message: commit.message.clone(),
            author: commit.author.clone(),
            timestamp: commit.timestamp,
            changed_files: changed_paths.len(),
            changed_methods: changed,
            skipped_files,
            impacted_methods: report.result.impacted_methods,
            impacted_tests: report.result.impacted_tests_by_owner,
            test_coverage_gaps: report.gaps,
            coverage: report.coverage,
            risk_score,
            classifications: BTreeMap::new(),
        };

        let classifications: BTreeMap<String, serde_json::Value> = self
            .classifiers
            .iter()
            .filter_map(|c| c.classify(&impact).map(|v| (c.name().to_string(), v)))
            .collect();
        impact.classifications = classifications;
        impact
    }
}

fn line_changes(diffs: &[FileDiff]) -> Vec<LineChanges> {
    diffs
        .iter()
        .map(|diff| LineChanges {
            path: diff.path.clone(),
            ranges: diff
                .hunks
                .iter()
                .map(|h| LineRange::from_hunk(h.new_start, h.new_len))
                .collect(),
        })
        .collect()
}
