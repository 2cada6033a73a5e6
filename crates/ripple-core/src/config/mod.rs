//! Configuration system for Ripple.
//! TOML-based, layered resolution: CLI > env > project > user > defaults.

pub mod analysis_config;
pub mod inspect_config;
pub mod ripple_config;

pub use analysis_config::AnalysisConfig;
pub use inspect_config::InspectConfig;
pub use ripple_config::{CliOverrides, RippleConfig};
