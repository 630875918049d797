//! Threshold classifier for smoothed heart rate

use serde::{Deserialize, Serialize};
use std::fmt;

/// Above this the reading is critical (bpm)
const CRITICAL_ABOVE: f64 = 120.0;
/// Above this the reading is high (bpm)
const HIGH_ABOVE: f64 = 100.0;
/// Below this the reading is low (bpm)
const LOW_BELOW: f64 = 50.0;

/// Heart-rate status band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    Critical,
    High,
    Low,
    Normal,
}

/// Alert severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Status {
    /// Lower-case label used in alert records
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Critical => "critical",
            Status::High => "high",
            Status::Low => "low",
            Status::Normal => "normal",
        }
    }
}

impl Severity {
    /// Lower-case label used in alert records
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Info => "info",
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }

    /// Whether this severity warrants a user-facing alert
    pub fn is_actionable(&self) -> bool {
        *self > Severity::Info
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status and severity for one value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub status: Status,
    pub severity: Severity,
}

/// Classify a smoothed heart rate (bpm).
///
/// Thresholds are strict, so 120, 100 and 50 themselves are normal.
/// Values that match no band, NaN included, fall through to normal.
pub fn classify(value: f64) -> ClassificationResult {
    let (status, severity) = if value > CRITICAL_ABOVE {
        (Status::Critical, Severity::Critical)
    } else if value > HIGH_ABOVE {
        (Status::High, Severity::Warning)
    } else if value < LOW_BELOW {
        (Status::Low, Severity::Warning)
    } else {
        (Status::Normal, Severity::Info)
    };

    ClassificationResult { status, severity }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn assert_band(value: f64, status: Status, severity: Severity) {
        assert_eq!(classify(value), ClassificationResult { status, severity }, "value {}", value);
    }

    #[test]
    fn test_boundaries() {
        assert_band(121.0, Status::Critical, Severity::Critical);
        assert_band(120.0, Status::Normal, Severity::Info);
        assert_band(101.0, Status::High, Severity::Warning);
        assert_band(100.0, Status::Normal, Severity::Info);
        assert_band(49.0, Status::Low, Severity::Warning);
        assert_band(50.0, Status::Normal, Severity::Info);
    }

    #[test]
    fn test_fractional_values_near_boundaries() {
        assert_band(120.000001, Status::Critical, Severity::Critical);
        assert_band(100.5, Status::High, Severity::Warning);
        assert_band(49.999, Status::Low, Severity::Warning);
        assert_band(0.0, Status::Low, Severity::Warning);
    }

    #[test]
    fn test_labels_serialize_lowercase() {
        let json = serde_json::to_string(&classify(130.0)).unwrap();
        assert_eq!(json, r#"{"status":"critical","severity":"critical"}"#);

        let json = serde_json::to_string(&classify(75.0)).unwrap();
        assert_eq!(json, r#"{"status":"normal","severity":"info"}"#);
    }

    #[test]
    fn test_labels_match_serialized_form() {
        for status in [Status::Critical, Status::High, Status::Low, Status::Normal] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
        }
        for severity in [Severity::Info, Severity::Warning, Severity::Critical] {
            let json = serde_json::to_string(&severity).unwrap();
            assert_eq!(json, format!("\"{}\"", severity.as_str()));
        }
    }

    #[test]
    fn test_actionable_severity() {
        assert!(!Severity::Info.is_actionable());
        assert!(Severity::Warning.is_actionable());
        assert!(Severity::Critical.is_actionable());
        assert_eq!(Status::High.to_string(), "high");
    }

    proptest! {
        #[test]
        fn prop_normal_band_is_closed_interval(value in 50.0f64..=100.0) {
            prop_assert_eq!(classify(value).status, Status::Normal);
        }

        #[test]
        fn prop_severity_matches_status(value in -50.0f64..300.0) {
            let result = classify(value);
            let expected = match result.status {
                Status::Critical => Severity::Critical,
                Status::High | Status::Low => Severity::Warning,
                Status::Normal => Severity::Info,
            };
            prop_assert_eq!(result.severity, expected);
        }
    }
}
