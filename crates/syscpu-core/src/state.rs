//! Per-sampler mutable state carried between calls.

use std::time::{Duration, SystemTime, UNIX_EPOCH};

use crate::environment::Environment;
use crate::platform::Version;

/// State owned by exactly one sampler instance.
///
/// The baseline timestamp and cumulative CPU time only change together, and
/// the access warning flag only ever goes from `false` to `true`.
#[derive(Debug, Clone)]
pub struct SamplerState {
    baseline_established: bool,
    last_sample_timestamp: SystemTime,
    last_cumulative_cpu_time: Duration,
    consecutive_failed_reads: u32,
    access_warning_logged: bool,
    runtime_version: Option<Option<Version>>,
}

impl Default for SamplerState {
    fn default() -> Self {
        Self {
            baseline_established: false,
            last_sample_timestamp: UNIX_EPOCH,
            last_cumulative_cpu_time: Duration::ZERO,
            consecutive_failed_reads: 0,
            access_warning_logged: false,
            runtime_version: None,
        }
    }
}

impl SamplerState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn baseline_established(&self) -> bool {
        self.baseline_established
    }

    pub fn last_sample_timestamp(&self) -> SystemTime {
        self.last_sample_timestamp
    }

    pub fn last_cumulative_cpu_time(&self) -> Duration {
        self.last_cumulative_cpu_time
    }

    pub fn consecutive_failed_reads(&self) -> u32 {
        self.consecutive_failed_reads
    }

    pub fn set_consecutive_failed_reads(&mut self, count: u32) {
        self.consecutive_failed_reads = count;
    }

    pub fn access_warning_logged(&self) -> bool {
        self.access_warning_logged
    }

    /// Record a new baseline. Establishes it on first use.
    pub fn advance_baseline(&mut self, timestamp: SystemTime, cumulative_cpu_time: Duration) {
        self.baseline_established = true;
        self.last_sample_timestamp = timestamp;
        self.last_cumulative_cpu_time = cumulative_cpu_time;
    }

    /// Flip the access warning flag. Returns `true` only on the transition,
    /// i.e. when the caller should emit the warning.
    pub fn claim_access_warning(&mut self) -> bool {
        !std::mem::replace(&mut self.access_warning_logged, true)
    }

    /// Runtime version, resolved from `env` on first use and cached.
    /// An unknown version is cached as well and never looked up again.
    pub fn runtime_version(&mut self, env: &dyn Environment) -> Option<Version> {
        *self
            .runtime_version
            .get_or_insert_with(|| env.runtime_version())
    }

    /// Whether the runtime version lookup has happened.
    pub fn runtime_version_resolved(&self) -> bool {
        self.runtime_version.is_some()
    }

    /// Cached runtime version, if it has been resolved and is known.
    pub fn cached_runtime_version(&self) -> Option<Version> {
        self.runtime_version.flatten()
    }
}
