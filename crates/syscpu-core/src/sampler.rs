//! Whole-machine CPU utilization provider.
//!
//! Each call to [`SystemTotalCpuProvider::take_sample`] asks the selector
//! which strategy applies, runs it against the provider's own
//! [`SamplerState`], and wraps the result:
//!
//! ```text
//! select_strategy ─┬─ Native   → counter% / 100                → 1 sample
//!                  └─ Computed → first call: seed baseline      → 0 samples
//!                                later: Δcpu / (cores × Δwall)  → 1 sample
//! ```
//!
//! Calls must not overlap; `&mut self` enforces that for a single owner.

use crate::config::SamplerConfig;
use crate::delta::DeltaStrategy;
use crate::environment::{Environment, SystemEnvironment};
use crate::error::SampleError;
use crate::logging::{LogFacade, SamplerLog};
use crate::native::NativeCounterStrategy;
use crate::provider::MetricsProvider;
use crate::sample::{MetricSample, emit};
use crate::state::SamplerState;
use crate::strategy::{StrategyKind, UsageStrategy, select_strategy};

/// Diagnostic name of the provider.
pub const DBG_NAME: &str = "total system CPU time";

const LOG_TARGET: &str = "syscpu::system_total_cpu";

/// Sampler for `system.cpu.total.norm.pct`.
pub struct SystemTotalCpuProvider {
    env: Box<dyn Environment>,
    log: Box<dyn SamplerLog>,
    config: SamplerConfig,
    state: SamplerState,
    native: NativeCounterStrategy,
    computed: DeltaStrategy,
}

impl SystemTotalCpuProvider {
    /// Provider for the real host, logging through the `log` facade.
    pub fn new(config: SamplerConfig) -> Self {
        Self::with_environment(
            Box::new(SystemEnvironment::new()),
            Box::new(LogFacade::scoped(LOG_TARGET)),
            config,
        )
    }

    /// Provider over an arbitrary environment and log sink.
    pub fn with_environment(
        env: Box<dyn Environment>,
        log: Box<dyn SamplerLog>,
        config: SamplerConfig,
    ) -> Self {
        Self {
            env,
            log,
            config,
            state: SamplerState::new(),
            native: NativeCounterStrategy::new(),
            computed: DeltaStrategy::new(),
        }
    }

    pub fn config(&self) -> &SamplerConfig {
        &self.config
    }

    pub fn state(&self) -> &SamplerState {
        &self.state
    }

    /// Whether the native counter handle has been created.
    pub fn native_counter_initialized(&self) -> bool {
        self.native.is_initialized()
    }

    /// Strategy the next call would use.
    pub fn active_strategy(&self) -> StrategyKind {
        select_strategy(self.env.platform(), self.config.strategy)
    }

    /// Take one sample: zero or one [`MetricSample`].
    pub fn take_sample(&mut self) -> Result<Vec<MetricSample>, SampleError> {
        let strategy: &mut dyn UsageStrategy = match self.active_strategy() {
            StrategyKind::Native => &mut self.native,
            StrategyKind::Computed => &mut self.computed,
        };
        let kind = strategy.kind();
        let usage = strategy.measure(&mut self.state, self.env.as_ref(), self.log.as_ref())?;
        match usage {
            Some(value) => log::debug!(target: LOG_TARGET, "{kind} cpu usage: {value:.4}"),
            None => log::debug!(target: LOG_TARGET, "{kind} baseline recorded, no sample yet"),
        }
        Ok(emit(usage, self.config.clamp_to_unit_range))
    }
}

impl Default for SystemTotalCpuProvider {
    fn default() -> Self {
        Self::new(SamplerConfig::default())
    }
}

impl MetricsProvider for SystemTotalCpuProvider {
    fn dbg_name(&self) -> &str {
        DBG_NAME
    }

    fn consecutive_failed_reads(&self) -> u32 {
        self.state.consecutive_failed_reads()
    }

    fn set_consecutive_failed_reads(&mut self, count: u32) {
        self.state.set_consecutive_failed_reads(count);
    }

    fn get_samples(&mut self) -> Result<Vec<MetricSample>, SampleError> {
        self.take_sample()
    }
}
