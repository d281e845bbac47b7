//! Native counter strategy: read an OS-aggregated CPU utilization percentage.

use std::io;

use crate::environment::Environment;
use crate::error::SampleError;
use crate::logging::SamplerLog;
use crate::state::SamplerState;
use crate::strategy::{StrategyKind, UsageStrategy};

/// OS-provided, pre-aggregated CPU utilization counter.
pub trait NativeCounter: Send {
    /// Utilization in percent (0–100) since the previous read.
    fn next_value(&mut self) -> io::Result<f64>;
}

/// Wraps a lazily created [`NativeCounter`] handle.
///
/// The handle is opened on the first call and reused for the lifetime of the
/// strategy. A failed open is reported for that call only; the next call
/// tries again.
#[derive(Default)]
pub struct NativeCounterStrategy {
    handle: Option<Box<dyn NativeCounter>>,
}

impl NativeCounterStrategy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the counter handle has been created.
    pub fn is_initialized(&self) -> bool {
        self.handle.is_some()
    }
}

impl std::fmt::Debug for NativeCounterStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeCounterStrategy")
            .field("initialized", &self.is_initialized())
            .finish()
    }
}

impl UsageStrategy for NativeCounterStrategy {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Native
    }

    fn measure(
        &mut self,
        _state: &mut SamplerState,
        env: &dyn Environment,
        _log: &dyn SamplerLog,
    ) -> Result<Option<f64>, SampleError> {
        let counter = match self.handle.take() {
            Some(counter) => counter,
            None => {
                let counter = env.open_native_counter().map_err(SampleError::CounterInit)?;
                log::debug!("native CPU counter created");
                counter
            }
        };
        let percent = self.handle.insert(counter).next_value()?;
        Ok(Some(percent / 100.0))
    }
}
