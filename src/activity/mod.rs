//! Activity logging.
//!
//! Portal handlers report what a student looked at through an injected
//! [`ActivityRecorder`]. Recording never fails and never blocks the request.
//!
//! # Sinks
//! - `TracingRecorder`: structured event on the `activity` target
//! - `ActivityLog`: JSON document per line, written by a background task
//! - `NoopRecorder`: drops everything

pub mod log;

use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

use crate::observability::metrics;

pub use log::ActivityLog;

/// One recorded activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityEvent {
    pub event: String,
    pub attributes: BTreeMap<String, String>,
    pub recorded_at_ms: u64,
}

impl ActivityEvent {
    pub fn new(event: &str, attributes: &[(&str, String)]) -> Self {
        let recorded_at_ms = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        Self {
            event: event.to_string(),
            attributes: attributes
                .iter()
                .map(|(key, value)| (key.to_string(), value.clone()))
                .collect(),
            recorded_at_ms,
        }
    }
}

/// Fire-and-forget activity sink.
pub trait ActivityRecorder: Send + Sync {
    fn record(&self, event: &str, attributes: &[(&str, String)]);
}

/// Emits each activity as a tracing event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingRecorder;

impl ActivityRecorder for TracingRecorder {
    fn record(&self, event: &str, attributes: &[(&str, String)]) {
        let attributes: BTreeMap<&str, &str> = attributes
            .iter()
            .map(|(key, value)| (*key, value.as_str()))
            .collect();
        tracing::info!(target: "activity", event, ?attributes, "activity");
        metrics::record_activity(event, "tracing");
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopRecorder;

impl ActivityRecorder for NoopRecorder {
    fn record(&self, _event: &str, _attributes: &[(&str, String)]) {}
}
