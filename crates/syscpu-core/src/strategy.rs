//! Strategy abstraction and the per-call platform selector.

use serde::{Deserialize, Serialize};

use crate::environment::Environment;
use crate::error::SampleError;
use crate::logging::SamplerLog;
use crate::platform::Platform;
use crate::state::SamplerState;

/// Platform whose kernel exposes an aggregate CPU counter.
pub const NATIVE_PLATFORM: Platform = Platform::Linux;

/// Which way CPU usage is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// Read the OS aggregate counter.
    Native,
    /// Sum process CPU time and compute the delta against a baseline.
    Computed,
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Native => write!(f, "native"),
            Self::Computed => write!(f, "computed"),
        }
    }
}

/// Configured preference; `Auto` applies the platform rule.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyPreference {
    #[default]
    Auto,
    Native,
    Computed,
}

impl std::str::FromStr for StrategyPreference {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "native" => Ok(Self::Native),
            "computed" | "delta" => Ok(Self::Computed),
            other => Err(format!(
                "unknown strategy '{other}' (expected auto, native or computed)"
            )),
        }
    }
}

/// Pick the strategy for this call. Total over platforms.
pub fn select_strategy(platform: Platform, preference: StrategyPreference) -> StrategyKind {
    match preference {
        StrategyPreference::Native => StrategyKind::Native,
        StrategyPreference::Computed => StrategyKind::Computed,
        StrategyPreference::Auto if platform == NATIVE_PLATFORM => StrategyKind::Native,
        StrategyPreference::Auto => StrategyKind::Computed,
    }
}

/// One way of turning host facts into a CPU usage fraction.
pub trait UsageStrategy {
    fn kind(&self) -> StrategyKind;

    /// Produce a usage fraction, or `None` while no baseline exists yet.
    fn measure(
        &mut self,
        state: &mut SamplerState,
        env: &dyn Environment,
        log: &dyn SamplerLog,
    ) -> Result<Option<f64>, SampleError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_uses_native_only_on_native_platform() {
        assert_eq!(
            select_strategy(Platform::Linux, StrategyPreference::Auto),
            StrategyKind::Native
        );
        for p in [Platform::MacOS, Platform::Windows, Platform::Other] {
            assert_eq!(
                select_strategy(p, StrategyPreference::Auto),
                StrategyKind::Computed
            );
        }
    }

    #[test]
    fn explicit_preference_wins() {
        assert_eq!(
            select_strategy(Platform::Linux, StrategyPreference::Computed),
            StrategyKind::Computed
        );
        assert_eq!(
            select_strategy(Platform::MacOS, StrategyPreference::Native),
            StrategyKind::Native
        );
    }

    #[test]
    fn preference_parses_from_cli_strings() {
        assert_eq!("auto".parse(), Ok(StrategyPreference::Auto));
        assert_eq!("Native".parse(), Ok(StrategyPreference::Native));
        assert_eq!("delta".parse(), Ok(StrategyPreference::Computed));
        assert!("fast".parse::<StrategyPreference>().is_err());
    }
}
