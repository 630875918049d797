//! Scalar Kalman Estimator
//!
//! One-dimensional predict/update filter with a constant-value process model.
//! Each call to [`Estimator::update`] depends only on the state left by the
//! previous call and the new measurement.

use crate::config::FilterConfig;
use crate::error::FilterError;
use tracing::debug;

/// Error covariance assigned by [`Estimator::reset`], independent of the seed covariance.
// TODO: move into FilterConfig once it has been tuned against recorded sessions.
pub const RESET_ERROR_COVARIANCE: f64 = 1.0;

/// Recursive estimator for a single noisy scalar signal
#[derive(Debug, Clone)]
pub struct Estimator {
    /// Current best estimate
    estimate: f64,
    /// Uncertainty of the estimate (never negative)
    error_covariance: f64,
    /// Drift allowed between samples
    process_noise: f64,
    /// Noise of one measurement
    measurement_noise: f64,
}

impl Estimator {
    /// Create a new estimator from seed values and noise constants
    pub fn new(
        initial_estimate: f64,
        initial_error_covariance: f64,
        process_noise: f64,
        measurement_noise: f64,
    ) -> Result<Self, FilterError> {
        Self::from_config(&FilterConfig {
            initial_estimate,
            initial_error_covariance,
            process_noise,
            measurement_noise,
            ..Default::default()
        })
    }

    /// Create an estimator from a validated configuration
    pub fn from_config(config: &FilterConfig) -> Result<Self, FilterError> {
        config.validate()?;
        Ok(Self {
            estimate: config.initial_estimate,
            error_covariance: config.initial_error_covariance,
            process_noise: config.process_noise,
            measurement_noise: config.measurement_noise,
        })
    }

    /// Fold one measurement into the estimate and return it rounded to the nearest integer
    pub fn update(&mut self, measurement: f64) -> Result<f64, FilterError> {
        if !measurement.is_finite() {
            return Err(FilterError::InvalidInput { value: measurement });
        }

        // Predict
        let predicted = self.error_covariance + self.process_noise;

        // Correct
        let gain = predicted / (predicted + self.measurement_noise);
        let estimate = self.estimate + gain * (measurement - self.estimate);
        let error_covariance = (1.0 - gain) * predicted;

        // Extreme finite inputs can overflow; state is only committed when finite
        if !estimate.is_finite() || !error_covariance.is_finite() {
            return Err(FilterError::InvalidInput { value: measurement });
        }

        self.estimate = estimate;
        self.error_covariance = error_covariance;

        debug!(
            measurement,
            gain,
            estimate = self.estimate,
            error_covariance = self.error_covariance,
            "estimator updated"
        );

        // f64::round rounds half away from zero
        Ok(self.estimate.round())
    }

    /// Gain the next update will apply, in `[0, 1)`
    pub fn predicted_gain(&self) -> f64 {
        let predicted = self.error_covariance + self.process_noise;
        predicted / (predicted + self.measurement_noise)
    }

    /// Re-seed the estimate with a fixed, moderate uncertainty
    pub fn reset(&mut self, value: f64) -> Result<(), FilterError> {
        if !value.is_finite() {
            return Err(FilterError::InvalidInput { value });
        }
        self.estimate = value;
        self.error_covariance = RESET_ERROR_COVARIANCE;
        Ok(())
    }

    /// Get current estimate (unrounded)
    pub fn estimate(&self) -> f64 {
        self.estimate
    }

    /// Get current error covariance
    pub fn error_covariance(&self) -> f64 {
        self.error_covariance
    }

    /// Get process noise
    pub fn process_noise(&self) -> f64 {
        self.process_noise
    }

    /// Get measurement noise
    pub fn measurement_noise(&self) -> f64 {
        self.measurement_noise
    }
}

impl Default for Estimator {
    fn default() -> Self {
        let config = FilterConfig::default();
        Self {
            estimate: config.initial_estimate,
            error_covariance: config.initial_error_covariance,
            process_noise: config.process_noise,
            measurement_noise: config.measurement_noise,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_single_update_matches_hand_computation() {
        let mut estimator = Estimator::default();

        // P' = 1.01, K = 1.01 / 3.01
        let result = estimator.update(72.0).unwrap();
        let gain = 1.01 / 3.01;
        assert!((estimator.estimate() - (70.0 + gain * 2.0)).abs() < 1e-12);
        assert!((estimator.error_covariance() - (1.0 - gain) * 1.01).abs() < 1e-12);
        assert_eq!(result, 71.0);
    }

    #[test]
    fn test_update_rounds_half_away_from_zero() {
        // Zero seed covariance and process noise keep the gain at zero
        let mut estimator = Estimator::new(72.5, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(estimator.update(72.5).unwrap(), 73.0);

        let mut estimator = Estimator::new(-72.5, 0.0, 0.0, 1.0).unwrap();
        assert_eq!(estimator.update(-72.5).unwrap(), -73.0);
    }

    #[test]
    fn test_invalid_measurement_leaves_state_unchanged() {
        let mut estimator = Estimator::default();
        estimator.update(75.0).unwrap();
        let estimate = estimator.estimate();
        let covariance = estimator.error_covariance();

        for bad in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            match estimator.update(bad) {
                Err(FilterError::InvalidInput { .. }) => {}
                other => panic!("unexpected result: {:?}", other),
            }
        }

        assert_eq!(estimator.estimate(), estimate);
        assert_eq!(estimator.error_covariance(), covariance);
    }

    #[test]
    fn test_overflowing_update_rejected_without_commit() {
        let mut estimator = Estimator::default();
        estimator.update(1e308).unwrap();
        let estimate = estimator.estimate();
        let covariance = estimator.error_covariance();
        assert!(estimate.is_finite());

        // Innovation overflows to -inf
        assert!(matches!(
            estimator.update(-1.7e308),
            Err(FilterError::InvalidInput { .. })
        ));
        assert_eq!(estimator.estimate(), estimate);
        assert_eq!(estimator.error_covariance(), covariance);

        let result = estimator.update(70.0).unwrap();
        assert!(result.is_finite());
        assert!(estimator.estimate().is_finite());
    }

    #[test]
    fn test_zero_measurement_noise_rejected() {
        assert!(matches!(
            Estimator::new(70.0, 1.0, 0.01, 0.0),
            Err(FilterError::InvalidConfiguration {
                field: "measurement_noise",
                ..
            })
        ));
        assert!(Estimator::new(70.0, 1.0, 0.01, -2.0).is_err());
        assert!(Estimator::new(70.0, -1.0, 0.01, 2.0).is_err());
        assert!(Estimator::new(70.0, 1.0, -0.01, 2.0).is_err());
    }

    #[test]
    fn test_reset_uses_fixed_covariance() {
        let mut estimator = Estimator::new(70.0, 5.0, 0.01, 2.0).unwrap();
        estimator.update(71.0).unwrap();

        estimator.reset(140.0).unwrap();
        assert_eq!(estimator.estimate(), 140.0);
        assert_eq!(estimator.error_covariance(), RESET_ERROR_COVARIANCE);
        assert_eq!(estimator.process_noise(), 0.01);
        assert_eq!(estimator.measurement_noise(), 2.0);
    }

    #[test]
    fn test_reset_rejects_non_finite() {
        let mut estimator = Estimator::default();
        assert!(estimator.reset(f64::NAN).is_err());
        assert_eq!(estimator.estimate(), 70.0);
    }

    #[test]
    fn test_convergence_to_constant_input() {
        let mut estimator = Estimator::default();
        let target = 90.0;
        let mut last_estimate = estimator.estimate();
        let mut last_covariance = estimator.error_covariance();

        for _ in 0..200 {
            estimator.update(target).unwrap();
            assert!(estimator.estimate() >= last_estimate);
            assert!(estimator.estimate() <= target);
            assert!(estimator.error_covariance() <= last_covariance);
            last_estimate = estimator.estimate();
            last_covariance = estimator.error_covariance();
        }

        assert!((estimator.estimate() - target).abs() < 1e-3);
    }

    #[test]
    fn test_covariance_vanishes_without_process_noise() {
        let mut estimator = Estimator::new(70.0, 1.0, 0.0, 2.0).unwrap();
        for _ in 0..1000 {
            estimator.update(70.0).unwrap();
        }
        assert!(estimator.error_covariance() < 0.01);
    }

    #[test]
    fn test_drift_correction_shrinks_when_converged() {
        let mut estimator = Estimator::default();
        for _ in 0..100 {
            estimator.update(73.0).unwrap();
        }

        let mut last_step = f64::MAX;
        for _ in 0..20 {
            let before = estimator.estimate();
            let rounded = before.round();
            estimator.update(rounded).unwrap();
            let step = (estimator.estimate() - before).abs();
            assert!(step > 0.0);
            assert!(step < last_step);
            last_step = step;
        }
    }

    proptest! {
        #[test]
        fn prop_gain_in_unit_interval(
            covariance in 0.0f64..1e6,
            q in 0.0f64..1e3,
            r in 1e-6f64..1e3,
            z in -300.0f64..300.0,
        ) {
            let mut estimator = Estimator::new(70.0, covariance, q, r).unwrap();
            for _ in 0..5 {
                let gain = estimator.predicted_gain();
                prop_assert!(gain >= 0.0);
                prop_assert!(gain < 1.0);
                estimator.update(z).unwrap();
                prop_assert!(estimator.error_covariance() >= 0.0);
            }
        }

        #[test]
        fn prop_estimate_stays_between_seed_and_target(target in 0.0f64..250.0) {
            let mut estimator = Estimator::default();
            let (lo, hi) = if target < 70.0 { (target, 70.0) } else { (70.0, target) };
            for _ in 0..50 {
                estimator.update(target).unwrap();
                prop_assert!(estimator.estimate() >= lo - 1e-9);
                prop_assert!(estimator.estimate() <= hi + 1e-9);
            }
        }
    }
}
