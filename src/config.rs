use serde::Deserialize;
use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::propagate::Sgp4Mode;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("YAML parse error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("invalid step {0:?}: {1}")]
    Step(String, String),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,
    #[serde(default)]
    pub implementation: ImplementationConfig,
    #[serde(default)]
    pub propagation: PropagationConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_test_data")]
    pub test_data: PathBuf,
    #[serde(default = "default_results")]
    pub results: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            test_data: default_test_data(),
            results: default_results(),
        }
    }
}

fn default_test_data() -> PathBuf {
    first_existing("/test-data/cases", "../../test-data/cases")
}

fn default_results() -> PathBuf {
    first_existing("/results", "../../results")
}

fn first_existing(preferred: &str, fallback: &str) -> PathBuf {
    if Path::new(preferred).exists() {
        PathBuf::from(preferred)
    } else {
        PathBuf::from(fallback)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImplementationConfig {
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: String,
}

impl Default for ImplementationConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            version: default_version(),
        }
    }
}

fn default_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropagationConfig {
    #[serde(default)]
    pub mode: Sgp4Mode,
}

impl Config {
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml::from_str(content)?;
        Ok(config)
    }

    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }
}

/// Parses a step override such as `30s` or `2m`. Must be a whole, non-zero number of seconds.
pub fn parse_step_override(s: &str) -> Result<NonZeroU32, ConfigError> {
    let err = |msg: &str| ConfigError::Step(s.to_string(), msg.to_string());
    let duration = humantime::parse_duration(s.trim()).map_err(|e| err(&e.to_string()))?;
    if duration.subsec_nanos() != 0 {
        return Err(err("must be a whole number of seconds"));
    }
    let seconds = u32::try_from(duration.as_secs()).map_err(|_| err("too large"))?;
    NonZeroU32::new(seconds).ok_or_else(|| err("must be positive"))
}
