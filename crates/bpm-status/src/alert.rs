//! Alert candidates for the notification layer

use crate::classifier::{classify, ClassificationResult, Severity, Status};
use serde::{Deserialize, Serialize};

/// Heart-rate alert ready to be stored and shown by the notification layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeartRateAlert {
    /// Monitored subject or vehicle the stream belongs to
    pub stream_id: String,
    /// Smoothed heart rate (bpm)
    pub bpm: f64,
    pub status: Status,
    pub severity: Severity,
    /// Short headline
    pub title: String,
    /// Human-readable description
    pub message: String,
}

impl HeartRateAlert {
    /// Build an alert for a classified value, or `None` when it is informational
    pub fn from_classification(
        stream_id: &str,
        bpm: f64,
        classification: ClassificationResult,
    ) -> Option<Self> {
        if !classification.severity.is_actionable() {
            return None;
        }

        let title = match classification.status {
            Status::Critical => "Critical heart rate",
            Status::High => "High heart rate",
            Status::Low => "Low heart rate",
            Status::Normal => return None,
        };

        Some(Self {
            stream_id: stream_id.to_string(),
            bpm,
            status: classification.status,
            severity: classification.severity,
            title: title.to_string(),
            message: format!("{}: heart rate at {} bpm", stream_id, bpm),
        })
    }

    /// Classify a value and build its alert
    pub fn evaluate(stream_id: &str, bpm: f64) -> Option<Self> {
        Self::from_classification(stream_id, bpm, classify(bpm))
    }
}
