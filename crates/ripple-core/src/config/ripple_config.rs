//! Top-level Ripple configuration with layered resolution.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::analysis_config::{DEFAULT_MAX_DEPTH, DEFAULT_MAX_FILES};
use super::inspect_config::DEFAULT_CACHE_DIR;
use super::{AnalysisConfig, InspectConfig};
use crate::errors::ConfigError;

/// Project config file name, looked up in the repository root.
pub const PROJECT_CONFIG_FILE: &str = "ripple.toml";

/// Upper bound accepted for `analysis.max_depth`.
pub const MAX_DEPTH_LIMIT: u32 = 1024;

/// `[analysis]` section. Unset fields fall through to lower layers.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AnalysisSection {
    pub max_depth: Option<u32>,
    pub max_files: Option<usize>,
    pub scope: Option<String>,
    pub gap_search_depth: Option<u32>,
}

impl AnalysisSection {
    pub fn effective_max_depth(&self) -> u32 {
        self.max_depth.unwrap_or(DEFAULT_MAX_DEPTH)
    }

    pub fn effective_max_files(&self) -> usize {
        self.max_files.unwrap_or(DEFAULT_MAX_FILES)
    }

    pub fn effective_scope(&self) -> String {
        self.scope.clone().unwrap_or_default()
    }
}

/// `[inspect]` section.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct InspectSection {
    pub branch: Option<String>,
    pub commits: Option<usize>,
    /// `YYYY-MM-DD`.
    pub since: Option<String>,
    pub cache_dir: Option<String>,
    pub threads: Option<usize>,
}

impl InspectSection {
    pub fn effective_cache_dir(&self) -> PathBuf {
        PathBuf::from(self.cache_dir.as_deref().unwrap_or(DEFAULT_CACHE_DIR))
    }

    /// Parsed `since` date, if set.
    pub fn effective_since(&self) -> Result<Option<NaiveDate>, ConfigError> {
        self.since.as_deref().map(parse_date).transpose()
    }
}

/// Resolution order (highest priority first):
/// 1. CLI flags (applied via `apply_cli_overrides`)
/// 2. Environment variables (`RIPPLE_*`)
/// 3. Project config (`ripple.toml` in the repository root)
/// 4. User config (`~/.ripple/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct RippleConfig {
    pub analysis: AnalysisSection,
    pub inspect: InspectSection,
}

/// CLI override arguments that can be applied to a config.
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub branch: Option<String>,
    pub commits: Option<usize>,
    pub since: Option<String>,
    pub max_depth: Option<u32>,
    pub scope: Option<String>,
    pub cache_dir: Option<String>,
    pub threads: Option<usize>,
}

impl RippleConfig {
    /// Load configuration with layered resolution and validate the result.
    pub fn load(root: &Path, cli_overrides: Option<&CliOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Layer 4 (lowest priority): user config
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                Self::merge_toml_file(&mut config, &user_config_path)?;
            }
        }

        // Layer 3: project config
        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        // Layer 2: environment variables
        Self::apply_env_overrides(&mut config);

        // Layer 1 (highest priority): CLI flags
        if let Some(cli) = cli_overrides {
            Self::apply_cli_overrides(&mut config, cli);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })
    }

    pub fn validate(config: &RippleConfig) -> Result<(), ConfigError> {
        if let Some(depth) = config.analysis.max_depth {
            if depth == 0 || depth > MAX_DEPTH_LIMIT {
                return Err(ConfigError::ValidationFailed {
                    field: "analysis.max_depth".to_string(),
                    message: format!("must be between 1 and {MAX_DEPTH_LIMIT}"),
                });
            }
        }
        if config.analysis.max_files == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.max_files".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if config.analysis.gap_search_depth == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "analysis.gap_search_depth".to_string(),
                message: "must be greater than 0 when set".to_string(),
            });
        }
        if config.inspect.threads == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "inspect.threads".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        config.inspect.effective_since()?;
        Ok(())
    }

    /// The effective analysis bounds.
    pub fn analysis_config(&self) -> AnalysisConfig {
        AnalysisConfig {
            max_depth: self.analysis.effective_max_depth(),
            max_files: self.analysis.effective_max_files(),
            scope: self.analysis.effective_scope(),
            gap_search_depth: self.analysis.gap_search_depth,
        }
    }

    /// The effective inspection settings, validated.
    pub fn inspect_config(&self) -> Result<InspectConfig, ConfigError> {
        let branch = self.inspect.branch.clone().ok_or_else(|| ConfigError::ValidationFailed {
            field: "inspect.branch".to_string(),
            message: "a branch name is required".to_string(),
        })?;
        let config = InspectConfig {
            branch,
            commits: self.inspect.commits,
            since: self.inspect.effective_since()?,
            cache_dir: self.inspect.effective_cache_dir(),
            threads: self.inspect.threads,
        };
        config.validate()?;
        Ok(config)
    }

    /// Returns the user config path: `~/.ripple/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(".ripple").join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are ignored.
    fn merge_toml_file(config: &mut RippleConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: RippleConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; only `Some` values in `other` win.
    fn merge(base: &mut RippleConfig, other: &RippleConfig) {
        // Analysis
        if other.analysis.max_depth.is_some() {
            base.analysis.max_depth = other.analysis.max_depth;
        }
        if other.analysis.max_files.is_some() {
            base.analysis.max_files = other.analysis.max_files;
        }
        if other.analysis.scope.is_some() {
            base.analysis.scope = other.analysis.scope.clone();
        }
        if other.analysis.gap_search_depth.is_some() {
            base.analysis.gap_search_depth = other.analysis.gap_search_depth;
        }

        // Inspect
        if other.inspect.branch.is_some() {
            base.inspect.branch = other.inspect.branch.clone();
        }
        if other.inspect.commits.is_some() {
            base.inspect.commits = other.inspect.commits;
        }
        if other.inspect.since.is_some() {
            base.inspect.since = other.inspect.since.clone();
        }
        if other.inspect.cache_dir.is_some() {
            base.inspect.cache_dir = other.inspect.cache_dir.clone();
        }
        if other.inspect.threads.is_some() {
            base.inspect.threads = other.inspect.threads;
        }
    }

    /// Pattern: `RIPPLE_ANALYSIS_MAX_DEPTH`, `RIPPLE_INSPECT_BRANCH`, etc.
    /// Values that fail to parse are ignored.
    fn apply_env_overrides(config: &mut RippleConfig) {
        if let Ok(val) = std::env::var("RIPPLE_ANALYSIS_MAX_DEPTH") {
            if let Ok(v) = val.parse::<u32>() {
                config.analysis.max_depth = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RIPPLE_ANALYSIS_MAX_FILES") {
            if let Ok(v) = val.parse::<usize>() {
                config.analysis.max_files = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RIPPLE_ANALYSIS_SCOPE") {
            config.analysis.scope = Some(val);
        }
        if let Ok(val) = std::env::var("RIPPLE_INSPECT_BRANCH") {
            config.inspect.branch = Some(val);
        }
        if let Ok(val) = std::env::var("RIPPLE_INSPECT_COMMITS") {
            if let Ok(v) = val.parse::<usize>() {
                config.inspect.commits = Some(v);
            }
        }
        if let Ok(val) = std::env::var("RIPPLE_INSPECT_SINCE") {
            config.inspect.since = Some(val);
        }
        if let Ok(val) = std::env::var("RIPPLE_INSPECT_CACHE_DIR") {
            config.inspect.cache_dir = Some(val);
        }
        if let Ok(val) = std::env::var("RIPPLE_INSPECT_THREADS") {
            if let Ok(v) = val.parse::<usize>() {
                config.inspect.threads = Some(v);
            }
        }
    }

    fn apply_cli_overrides(config: &mut RippleConfig, cli: &CliOverrides) {
        if let Some(ref v) = cli.branch {
            config.inspect.branch = Some(v.clone());
        }
        if let Some(v) = cli.commits {
            config.inspect.commits = Some(v);
        }
        if let Some(ref v) = cli.since {
            config.inspect.since = Some(v.clone());
        }
        if let Some(v) = cli.max_depth {
            config.analysis.max_depth = Some(v);
        }
        if let Some(ref v) = cli.scope {
            config.analysis.scope = Some(v.clone());
        }
        if let Some(ref v) = cli.cache_dir {
            config.inspect.cache_dir = Some(v.clone());
        }
        if let Some(v) = cli.threads {
            config.inspect.threads = Some(v);
        }
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn parse_date(value: &str) -> Result<NaiveDate, ConfigError> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| ConfigError::InvalidValue {
        field: "inspect.since".to_string(),
        message: format!("'{value}' is not a YYYY-MM-DD date: {e}"),
    })
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
