//! Heart-Rate Monitoring Pipeline
//!
//! Routes raw samples to one smoothing filter per stream, classifies the
//! output, and hands alert candidates to the notification layer.

mod error;
mod registry;
mod settings;

pub use error::MonitorError;
pub use registry::{Reading, StreamRegistry};
pub use settings::{LogFormat, MonitorSettings};

pub use bpm_filter::{FilterConfig, GuardAction};
pub use bpm_status::{ClassificationResult, HeartRateAlert, Severity, Status};

use std::str::FromStr;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

/// Initialize logging
pub fn init_logging(settings: &MonitorSettings) -> Result<(), MonitorError> {
    let level =
        Level::from_str(&settings.log_level).map_err(|e| MonitorError::Logging(e.to_string()))?;

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true);

    let result = match settings.log_format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish()),
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish()),
    };

    result.map_err(|e| MonitorError::Logging(e.to_string()))
}
