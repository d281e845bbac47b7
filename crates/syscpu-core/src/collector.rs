//! Polls providers and applies the consecutive-failure policy.
//!
//! A provider that returns an error or no samples for
//! `max_consecutive_failures` cycles in a row is disabled and no longer
//! polled. Any successful read resets its counter.

use std::time::SystemTime;

use crate::config::{DEFAULT_MAX_CONSECUTIVE_FAILURES, SamplerConfig};
use crate::provider::MetricsProvider;
use crate::sample::MetricSet;

/// Collects samples from a set of providers.
pub struct MetricsCollector {
    providers: Vec<Box<dyn MetricsProvider>>,
    max_consecutive_failures: u32,
}

impl MetricsCollector {
    pub fn new(max_consecutive_failures: u32) -> Self {
        Self {
            providers: Vec::new(),
            max_consecutive_failures: max_consecutive_failures.max(1),
        }
    }

    pub fn from_config(config: &SamplerConfig) -> Self {
        Self::new(config.max_consecutive_failures)
    }

    /// Register a provider.
    pub fn add_provider(&mut self, provider: Box<dyn MetricsProvider>) {
        self.providers.push(provider);
    }

    pub fn provider_count(&self) -> usize {
        self.providers.len()
    }

    /// Providers still being polled.
    pub fn active_provider_count(&self) -> usize {
        self.providers
            .iter()
            .filter(|p| !self.is_disabled(p.as_ref()))
            .count()
    }

    pub fn max_consecutive_failures(&self) -> u32 {
        self.max_consecutive_failures
    }

    fn is_disabled(&self, provider: &dyn MetricsProvider) -> bool {
        provider.consecutive_failed_reads() >= self.max_consecutive_failures
    }

    /// Poll every active provider once.
    pub fn collect_all_metrics(&mut self) -> MetricSet {
        let max = self.max_consecutive_failures;
        let mut samples = Vec::new();

        for provider in &mut self.providers {
            if provider.consecutive_failed_reads() >= max {
                continue;
            }

            let failure = match provider.get_samples() {
                Ok(batch) if !batch.is_empty() => {
                    provider.set_consecutive_failed_reads(0);
                    samples.extend(batch);
                    continue;
                }
                Ok(_) => format!("no data from {}", provider.dbg_name()),
                Err(err) => format!("failed reading {}: {err}", provider.dbg_name()),
            };

            let failed = provider.consecutive_failed_reads().saturating_add(1);
            provider.set_consecutive_failed_reads(failed);
            if failed >= max {
                log::warn!(
                    "{failure} ({failed} consecutive times); {} will not be collected any more",
                    provider.dbg_name()
                );
            } else {
                log::debug!("{failure} ({failed} consecutive times)");
            }
        }

        MetricSet::new(SystemTime::now(), samples)
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CONSECUTIVE_FAILURES)
    }
}
