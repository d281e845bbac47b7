//! Sampler and collector configuration.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::strategy::StrategyPreference;

/// Consecutive failed reads after which a provider is disabled.
pub const DEFAULT_MAX_CONSECUTIVE_FAILURES: u32 = 5;

/// Default collection interval.
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

/// Configuration for the CPU sampler and its collector.
///
/// Every field is optional in JSON; missing fields take their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplerConfig {
    /// Strategy override. `auto` follows the platform.
    pub strategy: StrategyPreference,
    /// Clamp emitted values into `[0, 1]`. Off by default: negative or
    /// above-one readings from the computed path are reported as measured.
    pub clamp_to_unit_range: bool,
    /// Failed reads in a row before the collector disables a provider.
    pub max_consecutive_failures: u32,
    /// Collection interval in milliseconds.
    pub interval_ms: u64,
}

impl Default for SamplerConfig {
    fn default() -> Self {
        Self {
            strategy: StrategyPreference::Auto,
            clamp_to_unit_range: false,
            max_consecutive_failures: DEFAULT_MAX_CONSECUTIVE_FAILURES,
            interval_ms: DEFAULT_INTERVAL_MS,
        }
    }
}

impl SamplerConfig {
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

/// Load a [`SamplerConfig`] from a JSON file.
pub fn load_config_from_path(path: &Path) -> std::io::Result<SamplerConfig> {
    let raw = std::fs::read_to_string(path)?;
    serde_json::from_str::<SamplerConfig>(&raw).map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("failed to parse sampler config JSON: {e}"),
        )
    })
}
