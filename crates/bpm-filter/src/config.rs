//! Filter configuration

use crate::error::FilterError;
use serde::{Deserialize, Serialize};

/// Tuning constants for one heart-rate stream
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Seed estimate (bpm)
    pub initial_estimate: f64,

    /// Seed error covariance
    pub initial_error_covariance: f64,

    /// Expected drift of the true value between samples
    pub process_noise: f64,

    /// Expected noise of a single sample
    pub measurement_noise: f64,

    /// Jump size (bpm) above which the guard re-seeds the estimator
    pub reset_threshold: f64,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            initial_estimate: 70.0,
            initial_error_covariance: 1.0,
            process_noise: 0.01,
            measurement_noise: 2.0,
            reset_threshold: 30.0,
        }
    }
}

impl FilterConfig {
    /// Create responsive config (tracks changes faster)
    pub fn responsive() -> Self {
        Self {
            process_noise: 0.1,
            measurement_noise: 1.0,
            ..Default::default()
        }
    }

    /// Create smooth config (heavier smoothing, slower tracking)
    pub fn smooth() -> Self {
        Self {
            process_noise: 0.005,
            measurement_noise: 4.0,
            ..Default::default()
        }
    }

    /// Check every constant against its construction constraint
    pub fn validate(&self) -> Result<(), FilterError> {
        finite("initial_estimate", self.initial_estimate)?;
        non_negative("initial_error_covariance", self.initial_error_covariance)?;
        non_negative("process_noise", self.process_noise)?;
        non_negative("reset_threshold", self.reset_threshold)?;

        finite("measurement_noise", self.measurement_noise)?;
        if self.measurement_noise <= 0.0 {
            return Err(FilterError::InvalidConfiguration {
                field: "measurement_noise",
                value: self.measurement_noise,
                reason: "must be greater than zero",
            });
        }

        Ok(())
    }
}

fn finite(field: &'static str, value: f64) -> Result<(), FilterError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(FilterError::InvalidConfiguration {
            field,
            value,
            reason: "must be finite",
        })
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), FilterError> {
    finite(field, value)?;
    if value < 0.0 {
        Err(FilterError::InvalidConfiguration {
            field,
            value,
            reason: "must not be negative",
        })
    } else {
        Ok(())
    }
}
