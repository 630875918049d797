//! Outlier Guard
//!
//! Permissive shell around [`Estimator`]: bad samples are coerced to `0`
//! without touching state, and large jumps re-seed the estimator instead of
//! being absorbed slowly.

use crate::config::{non_negative, FilterConfig};
use crate::error::FilterError;
use crate::estimator::Estimator;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Output substituted for a rejected sample
const REJECTED_OUTPUT: f64 = 0.0;

/// What the guard did with a sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GuardAction {
    /// Folded into the estimator as-is
    Accepted,
    /// Estimator re-seeded at the sample, then updated
    Reset,
    /// Not a finite number, or refused by the estimator
    Rejected,
}

/// Result of guarding one sample
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GuardOutcome {
    /// Filtered output (rounded bpm, or 0 when rejected)
    pub value: f64,
    /// Action taken
    pub action: GuardAction,
}

/// Estimator wrapped with the reset and invalid-input policy
#[derive(Debug, Clone)]
pub struct OutlierGuard {
    estimator: Estimator,
    reset_threshold: f64,
}

impl OutlierGuard {
    /// Create a guard and its estimator from configuration
    pub fn new(config: &FilterConfig) -> Result<Self, FilterError> {
        Ok(Self {
            estimator: Estimator::from_config(config)?,
            reset_threshold: config.reset_threshold,
        })
    }

    /// Wrap an existing estimator; the threshold must be finite and non-negative
    pub fn with_estimator(
        estimator: Estimator,
        reset_threshold: f64,
    ) -> Result<Self, FilterError> {
        non_negative("reset_threshold", reset_threshold)?;
        Ok(Self {
            estimator,
            reset_threshold,
        })
    }

    /// Filter a sample and return only the output value
    pub fn filter(&mut self, sample: f64) -> f64 {
        self.process(sample).value
    }

    /// Filter a sample, reporting the action taken
    pub fn process(&mut self, sample: f64) -> GuardOutcome {
        if !sample.is_finite() {
            warn!(sample, "rejected non-finite heart-rate sample");
            return GuardOutcome {
                value: REJECTED_OUTPUT,
                action: GuardAction::Rejected,
            };
        }

        let current = self.estimator.estimate();
        let mut action = GuardAction::Accepted;

        // A non-positive estimate is a placeholder seed, never a reason to reset
        if (sample - current).abs() > self.reset_threshold && current > 0.0 {
            info!(
                previous = current,
                sample, "heart-rate jump exceeds threshold, resetting estimator"
            );
            if self.estimator.reset(sample).is_ok() {
                action = GuardAction::Reset;
            }
        }

        match self.estimator.update(sample) {
            Ok(value) => GuardOutcome { value, action },
            Err(e) => {
                warn!(error = %e, "estimator refused sample");
                GuardOutcome {
                    value: REJECTED_OUTPUT,
                    action: GuardAction::Rejected,
                }
            }
        }
    }

    /// Get current unrounded estimate
    pub fn estimate(&self) -> f64 {
        self.estimator.estimate()
    }

    /// Get the wrapped estimator
    pub fn estimator(&self) -> &Estimator {
        &self.estimator
    }

    /// Get reset threshold (bpm)
    pub fn reset_threshold(&self) -> f64 {
        self.reset_threshold
    }
}

impl Default for OutlierGuard {
    fn default() -> Self {
        Self {
            estimator: Estimator::default(),
            reset_threshold: FilterConfig::default().reset_threshold,
        }
    }
}
