//! Monitor Error Types

use bpm_filter::FilterError;
use thiserror::Error;

/// Errors while setting up the monitoring pipeline
#[derive(Debug, Error)]
pub enum MonitorError {
    /// Settings could not be read or parsed
    #[error("Settings error: {0}")]
    Settings(#[from] config::ConfigError),

    /// Filter constants rejected
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// Subscriber could not be installed
    #[error("Logging setup failed: {0}")]
    Logging(String),
}
