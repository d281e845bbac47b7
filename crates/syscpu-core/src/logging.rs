//! Leveled logging capability consumed by samplers.
//!
//! User-facing sampler messages go through a [`SamplerLog`]; the `log`
//! macros are only used for debug tracing.

use std::sync::{Arc, Mutex};

/// Sink for sampler diagnostics.
pub trait SamplerLog: Send {
    fn info(&self, message: &str);
}

/// [`SamplerLog`] that forwards to the `log` facade under a fixed target.
#[derive(Debug, Clone, Copy)]
pub struct LogFacade {
    target: &'static str,
}

impl LogFacade {
    /// Scope all messages under `target` (e.g. `"syscpu::system_total_cpu"`).
    pub const fn scoped(target: &'static str) -> Self {
        Self { target }
    }
}

impl Default for LogFacade {
    fn default() -> Self {
        Self::scoped(module_path!())
    }
}

impl SamplerLog for LogFacade {
    fn info(&self, message: &str) {
        log::info!(target: self.target, "{message}");
    }
}

/// In-memory [`SamplerLog`] that records `"<Level> <message>"` lines.
///
/// Clones share the same buffer, so one clone can be handed to a sampler and
/// the other inspected afterwards.
#[derive(Debug, Clone, Default)]
pub struct MemoryLog {
    lines: Arc<Mutex<Vec<String>>>,
}

impl MemoryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of all recorded lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    fn push(&self, level: &str, message: &str) {
        if let Ok(mut lines) = self.lines.lock() {
            lines.push(format!("{level} {message}"));
        }
    }
}

impl SamplerLog for MemoryLog {
    fn info(&self, message: &str) {
        self.push("Info", message);
    }
}
