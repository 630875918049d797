//! Monitor settings

use crate::error::MonitorError;
use bpm_filter::FilterConfig;
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment prefix for overrides, e.g. `BPM_MONITOR__FILTER__PROCESS_NOISE`
const ENV_PREFIX: &str = "BPM_MONITOR";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Settings for the monitoring pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitorSettings {
    /// Filter constants applied to every new stream
    pub filter: FilterConfig,
    /// Maximum tracing level
    pub log_level: String,
    /// Log output format
    pub log_format: LogFormat,
}

impl Default for MonitorSettings {
    fn default() -> Self {
        Self {
            filter: FilterConfig::default(),
            log_level: "info".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl MonitorSettings {
    /// Load settings from an optional file, then environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self, MonitorError> {
        Self::load_with_env(path, environment())
    }

    fn load_with_env(path: Option<&Path>, env: Environment) -> Result<Self, MonitorError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).required(false));
        }

        let settings: MonitorSettings = builder.add_source(env).build()?.try_deserialize()?;

        settings.filter.validate()?;
        Ok(settings)
    }
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .separator("__")
        .try_parsing(true)
}
