//! Computed strategy: CPU usage from cumulative process CPU time deltas.
//!
//! Summing every process is the portable fallback for hosts without an
//! aggregate counter. It costs one read per process, so it is noticeably
//! slower than the native path.
//!
//! A cycle in which no process could be read yields no sample and leaves the
//! baseline untouched.

use std::time::{Duration, SystemTime};

use crate::correction::correct_cpu_delta;
use crate::environment::Environment;
use crate::error::SampleError;
use crate::logging::SamplerLog;
use crate::state::SamplerState;
use crate::strategy::{StrategyKind, UsageStrategy};

/// Logged once per sampler when some process could not be read.
pub const ACCESS_WARNING: &str = "The overall CPU usage reported may be inaccurate. \
     Unable to access the CPU usage of some other processes";

/// Total CPU time of all readable processes and how many were skipped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessCpuSum {
    pub total: Duration,
    pub readable: usize,
    pub skipped: usize,
}

/// Fold per-process readings into a single sum, skipping failures.
pub fn sum_process_cpu_times<I>(readings: I) -> ProcessCpuSum
where
    I: IntoIterator<Item = std::io::Result<Duration>>,
{
    let mut sum = ProcessCpuSum::default();
    for reading in readings {
        match reading {
            Ok(cpu) => {
                sum.total = sum.total.saturating_add(cpu);
                sum.readable += 1;
            }
            Err(_) => sum.skipped += 1,
        }
    }
    sum
}

/// Signed difference `now - before` in milliseconds.
pub fn signed_delta_ms(now: Duration, before: Duration) -> f64 {
    let delta_ns = now.as_nanos() as i128 - before.as_nanos() as i128;
    delta_ns as f64 / 1_000_000.0
}

/// Wall time between two instants in milliseconds; `0` if the clock went back.
pub fn elapsed_ms(now: SystemTime, before: SystemTime) -> f64 {
    now.duration_since(before)
        .map(|d| d.as_nanos() as f64 / 1_000_000.0)
        .unwrap_or(0.0)
}

/// Normalize a CPU time delta over a wall-time window and all processors.
///
/// Both arguments are in the same unit. A zero window yields `0.0`.
pub fn normalized_usage(cpu_delta: f64, elapsed: f64, processors: usize) -> f64 {
    if elapsed == 0.0 {
        return 0.0;
    }
    cpu_delta / (processors.max(1) as f64 * elapsed)
}

/// Baseline-and-delta strategy over enumerated processes.
#[derive(Debug, Default, Clone, Copy)]
pub struct DeltaStrategy;

impl DeltaStrategy {
    pub fn new() -> Self {
        Self
    }
}

impl UsageStrategy for DeltaStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Computed
    }

    fn measure(
        &mut self,
        state: &mut SamplerState,
        env: &dyn Environment,
        log: &dyn SamplerLog,
    ) -> Result<Option<f64>, SampleError> {
        let now = env.now();
        let sum = sum_process_cpu_times(env.process_cpu_times());
        if sum.skipped > 0 && state.claim_access_warning() {
            log.info(ACCESS_WARNING);
        }
        if sum.readable == 0 {
            log::debug!("no readable processes ({} skipped)", sum.skipped);
            return Ok(None);
        }
        log::trace!(
            "summed cpu time of {} processes ({} skipped): {:?}",
            sum.readable,
            sum.skipped,
            sum.total
        );

        if !state.baseline_established() {
            state.advance_baseline(now, sum.total);
            return Ok(None);
        }

        let raw_delta = signed_delta_ms(sum.total, state.last_cumulative_cpu_time());
        let runtime_version = state.runtime_version(env);
        let cpu_delta = correct_cpu_delta(raw_delta, env.platform(), runtime_version);
        let elapsed = elapsed_ms(now, state.last_sample_timestamp());
        let usage = normalized_usage(cpu_delta, elapsed, env.processor_count());

        state.advance_baseline(now, sum.total);
        Ok(Some(usage))
    }
}
