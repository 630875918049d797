//! Per-stream filter registry
//!
//! Each monitored subject or vehicle gets its own [`OutlierGuard`]; samples
//! are routed by stream id and never share estimator state.

use crate::error::MonitorError;
use bpm_filter::{FilterConfig, GuardAction, OutlierGuard};
use bpm_status::{classify, ClassificationResult, HeartRateAlert};
use metrics::{counter, gauge};
use serde::Serialize;
use std::collections::HashMap;
use tracing::{debug, info};

/// One processed sample
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Reading {
    /// Stream the sample belongs to
    pub stream_id: String,
    /// Raw sample as received
    pub sample: f64,
    /// Filtered output (rounded bpm, or 0 when rejected)
    pub value: f64,
    /// What the guard did with the sample
    pub action: GuardAction,
    /// Classification of the output; absent for rejected samples
    pub classification: Option<ClassificationResult>,
}

impl Reading {
    /// Alert candidate for the notification layer, if the reading warrants one
    pub fn alert(&self) -> Option<HeartRateAlert> {
        let classification = self.classification?;
        HeartRateAlert::from_classification(&self.stream_id, self.value, classification)
    }
}

/// Registry of smoothing filters keyed by stream id
pub struct StreamRegistry {
    /// Constants used for every new stream
    config: FilterConfig,
    /// Freshly seeded guard cloned for new streams
    template: OutlierGuard,
    /// Active streams
    streams: HashMap<String, OutlierGuard>,
}

impl StreamRegistry {
    /// Create a new registry with given filter config
    pub fn new(config: FilterConfig) -> Result<Self, MonitorError> {
        let template = OutlierGuard::new(&config)?;
        info!("Creating stream registry with config: {:?}", config);
        Ok(Self {
            config,
            template,
            streams: HashMap::new(),
        })
    }

    /// Start (or restart) a monitoring session for a stream
    pub fn open_stream(&mut self, stream_id: &str) {
        let replaced = self
            .streams
            .insert(stream_id.to_string(), self.template.clone())
            .is_some();
        info!(stream_id, replaced, "stream opened");
        self.report_active();
    }

    /// End a monitoring session
    pub fn close_stream(&mut self, stream_id: &str) -> bool {
        let removed = self.streams.remove(stream_id).is_some();
        if removed {
            info!(stream_id, "stream closed");
            self.report_active();
        }
        removed
    }

    /// Route a raw sample to its stream, opening the stream on first use
    pub fn ingest(&mut self, stream_id: &str, sample: f64) -> Reading {
        counter!("bpm_samples_total").increment(1);

        let mut opened = false;
        let template = &self.template;
        let outcome = self
            .streams
            .entry(stream_id.to_string())
            .or_insert_with(|| {
                opened = true;
                template.clone()
            })
            .process(sample);

        if opened {
            info!(stream_id, "stream opened on first sample");
            self.report_active();
        }

        match outcome.action {
            GuardAction::Rejected => counter!("bpm_samples_rejected_total").increment(1),
            GuardAction::Reset => counter!("bpm_filter_resets_total").increment(1),
            GuardAction::Accepted => {}
        }

        let classification = match outcome.action {
            GuardAction::Rejected => None,
            _ => Some(classify(outcome.value)),
        };

        debug!(
            stream_id,
            sample,
            value = outcome.value,
            action = ?outcome.action,
            "sample ingested"
        );

        Reading {
            stream_id: stream_id.to_string(),
            sample,
            value: outcome.value,
            action: outcome.action,
            classification,
        }
    }

    /// Get current unrounded estimate for a stream
    pub fn stream_estimate(&self, stream_id: &str) -> Option<f64> {
        self.streams.get(stream_id).map(|guard| guard.estimate())
    }

    /// Ids of all active streams
    pub fn active_streams(&self) -> Vec<&str> {
        self.streams.keys().map(|k| k.as_str()).collect()
    }

    /// Get filter config applied to new streams
    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Number of active streams
    pub fn len(&self) -> usize {
        self.streams.len()
    }

    /// Check if no stream is active
    pub fn is_empty(&self) -> bool {
        self.streams.is_empty()
    }

    fn report_active(&self) {
        gauge!("bpm_active_streams").set(self.streams.len() as f64);
    }
}

impl Default for StreamRegistry {
    fn default() -> Self {
        Self {
            config: FilterConfig::default(),
            template: OutlierGuard::default(),
            streams: HashMap::new(),
        }
    }
}
