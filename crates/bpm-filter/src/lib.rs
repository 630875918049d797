//! Heart-Rate Smoothing Filter
//!
//! Provides a scalar Kalman estimator and the outlier guard that feeds it.

mod config;
mod error;
mod estimator;
mod guard;

pub use config::FilterConfig;
pub use error::FilterError;
pub use estimator::{Estimator, RESET_ERROR_COVARIANCE};
pub use guard::{GuardAction, GuardOutcome, OutlierGuard};
