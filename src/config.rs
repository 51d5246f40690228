use crate::models::MatchingAlgorithm;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scores: ScoreSettings,
    #[serde(default)]
    pub dataset: DatasetSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    /// Policy to run when the caller does not pick one
    #[serde(default = "default_algorithm")]
    pub algorithm: MatchingAlgorithm,
    /// Apply safety-first preference truncation before a baseline run
    #[serde(default)]
    pub safety_first: bool,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            algorithm: default_algorithm(),
            safety_first: false,
        }
    }
}

fn default_algorithm() -> MatchingAlgorithm {
    MatchingAlgorithm::Baseline
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreSettings {
    #[serde(default = "default_score_min")]
    pub min: i64,
    #[serde(default = "default_score_max")]
    pub max: i64,
    /// Stable seed for generated scores, e.g. the session id
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for ScoreSettings {
    fn default() -> Self {
        Self {
            min: default_score_min(),
            max: default_score_max(),
            seed: default_seed(),
        }
    }
}

fn default_score_min() -> i64 { 0 }
fn default_score_max() -> i64 { 100 }
fn default_seed() -> u64 { 1 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DatasetSettings {
    /// Dataset file to load when none is given on the command line
    pub path: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with ADMIT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g. ADMIT__MATCHING__ALGORITHM -> matching.algorithm
            .add_source(
                Environment::with_prefix("ADMIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("ADMIT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}
