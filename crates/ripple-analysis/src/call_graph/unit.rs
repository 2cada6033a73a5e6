//! Analysis unit — the bounded, parsed file set a call graph is built from.

use rayon::prelude::*;
use ripple_core::config::AnalysisConfig;
use ripple_core::errors::{PipelineError, PipelineResult};
use tracing::{debug, warn};

use crate::source_model::{ParsedFile, SourceFile, SourceModel};

/// Parsed files of one unit, in input order.
#[derive(Debug, Clone, Default)]
pub struct AnalysisUnit {
    pub files: Vec<ParsedFile>,
    /// Files dropped because they could not be parsed.
    pub skipped: usize,
    /// Files dropped by the `max_files` cap.
    pub truncated: usize,
}

impl AnalysisUnit {
    /// Filter by source extension and scope, cap at `max_files`, and parse
    /// in parallel. Unparseable files are skipped and reported as non-fatal
    /// errors; they never abort the unit.
    pub fn load(
        files: Vec<SourceFile>,
        model: &dyn SourceModel,
        config: &AnalysisConfig,
    ) -> PipelineResult<AnalysisUnit> {
        let scope = config.scope_path();
        let mut admitted: Vec<SourceFile> = files
            .into_iter()
            .filter(|f| model.supports(&f.path))
            .filter(|f| match &scope {
                Some(scope) => f.path.replace('\\', "/").contains(scope.as_str()),
                None => true,
            })
            .collect();

        let mut truncated = 0;
        if admitted.len() > config.max_files {
            truncated = admitted.len() - config.max_files;
            warn!(
                admitted = config.max_files,
                dropped = truncated,
                "file cap reached; analysis continues on a partial file set"
            );
            admitted.truncate(config.max_files);
        }

        let parsed: Vec<_> = admitted
            .par_iter()
            .map(|file| model.parse_file(file))
            .collect();

        let mut result = PipelineResult::new(AnalysisUnit {
            truncated,
            ..Default::default()
        });
        for (file, outcome) in admitted.iter().zip(parsed) {
            match outcome {
                Ok(parsed) => result.data.files.push(parsed),
                Err(e) => {
                    warn!(path = %file.path, error = %e, "skipping unparseable file");
                    result.data.skipped += 1;
                    result.add_error(PipelineError::Parse(e));
                }
            }
        }

        debug!(
            files = result.data.files.len(),
            skipped = result.data.skipped,
            "analysis unit loaded"
        );
        result
    }

    /// Wrap files that were parsed elsewhere.
    pub fn from_parsed(files: Vec<ParsedFile>) -> Self {
        Self {
            files,
            skipped: 0,
            truncated: 0,
        }
    }
}
