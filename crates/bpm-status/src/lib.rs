//! Heart-Rate Status
//!
//! Maps smoothed heart-rate values to a status and severity, and builds the
//! alert candidates handed to the notification layer.

mod alert;
mod classifier;

pub use alert::HeartRateAlert;
pub use classifier::{classify, ClassificationResult, Severity, Status};
