//! Metric samples and the emitter that wraps strategy results.

use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};

/// Name of the normalized whole-machine CPU utilization metric.
pub const SYSTEM_CPU_TOTAL_NORM_PCT: &str = "system.cpu.total.norm.pct";

/// A single named metric value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricSample {
    pub name: String,
    pub value: f64,
}

impl MetricSample {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Samples gathered from every provider during one collection cycle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MetricSet {
    pub timestamp_unix_ms: u64,
    pub samples: Vec<MetricSample>,
}

impl MetricSet {
    pub fn new(timestamp: SystemTime, samples: Vec<MetricSample>) -> Self {
        Self {
            timestamp_unix_ms: timestamp
                .duration_since(UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            samples,
        }
    }

    /// Value of the first sample named `name`, if present.
    pub fn value_of(&self, name: &str) -> Option<f64> {
        self.samples.iter().find(|s| s.name == name).map(|s| s.value)
    }
}

/// Wrap a CPU usage fraction into the provider's output contract.
///
/// `None` (no baseline yet) and non-finite values produce an empty set; a
/// value produces exactly one [`SYSTEM_CPU_TOTAL_NORM_PCT`] sample. With
/// `clamp` the value is limited to `[0, 1]`.
pub fn emit(usage: Option<f64>, clamp: bool) -> Vec<MetricSample> {
    let Some(value) = usage.filter(|v| v.is_finite()) else {
        return Vec::new();
    };
    let value = if clamp { value.clamp(0.0, 1.0) } else { value };
    vec![MetricSample::new(SYSTEM_CPU_TOTAL_NORM_PCT, value)]
}
