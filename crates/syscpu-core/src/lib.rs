//! # syscpu-core
//!
//! **System-wide CPU utilization, normalized to a fraction of all processors.**
//!
//! `syscpu-core` samples total CPU usage for the whole host and emits it as a
//! single metric, `system.cpu.total.norm.pct`, in the range `[0, 1]` under
//! normal conditions.
//!
//! ## Quick Start
//!
//! ```no_run
//! use syscpu_core::{MetricsCollector, SamplerConfig, SystemTotalCpuProvider};
//!
//! let config = SamplerConfig::default();
//! let mut collector = MetricsCollector::from_config(&config);
//! collector.add_provider(Box::new(SystemTotalCpuProvider::new(config)));
//!
//! // The computed strategy needs one cycle to seed its baseline.
//! let _ = collector.collect_all_metrics();
//! std::thread::sleep(std::time::Duration::from_secs(1));
//! let set = collector.collect_all_metrics();
//! println!("{:?}", set.value_of(syscpu_core::SYSTEM_CPU_TOTAL_NORM_PCT));
//! ```
//!
//! ## Architecture
//!
//! Environment → Strategy → Correction → Emitter → Collector
//!
//! Two measurement strategies:
//! - **Native**: an OS aggregate counter (`/proc/stat` on Linux), created
//!   lazily on first use and reused afterwards.
//! - **Computed**: sums the cumulative CPU time of every readable process and
//!   divides the delta between samples by elapsed wall time and processor
//!   count. The first call only seeds the baseline.
//!
//! The strategy is chosen per call from the platform and the configured
//! [`StrategyPreference`]. Every source of time, process data, and logging
//! sits behind the [`Environment`] and [`SamplerLog`] traits so the
//! algorithm can be driven deterministically in tests.

pub mod collector;
pub mod config;
pub mod correction;
pub mod delta;
pub mod environment;
pub mod error;
pub mod logging;
pub mod native;
pub mod platform;
pub mod procfs;
pub mod provider;
pub mod ps;
pub mod sample;
pub mod sampler;
pub mod state;
pub mod strategy;

pub use collector::MetricsCollector;
pub use config::{
    DEFAULT_INTERVAL_MS, DEFAULT_MAX_CONSECUTIVE_FAILURES, SamplerConfig, load_config_from_path,
};
pub use correction::{
    LEGACY_PLATFORM, LEGACY_VERSION_THRESHOLD, correct_cpu_delta, needs_correction,
};
pub use delta::{ACCESS_WARNING, DeltaStrategy, ProcessCpuSum, sum_process_cpu_times};
pub use environment::{Environment, SystemEnvironment};
pub use error::SampleError;
pub use logging::{LogFacade, MemoryLog, SamplerLog};
pub use native::{NativeCounter, NativeCounterStrategy};
pub use platform::{Platform, PlatformInfo, Version, platform_info};
pub use provider::MetricsProvider;
pub use sample::{MetricSample, MetricSet, SYSTEM_CPU_TOTAL_NORM_PCT, emit};
pub use sampler::{DBG_NAME, SystemTotalCpuProvider};
pub use state::SamplerState;
pub use strategy::{
    NATIVE_PLATFORM, StrategyKind, StrategyPreference, UsageStrategy, select_strategy,
};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
