//! `syscpu info`: platform details and strategy selection.

use serde::Serialize;
use syscpu_core::platform::Version;
use syscpu_core::{
    LEGACY_PLATFORM, PlatformInfo, StrategyKind, StrategyPreference, needs_correction,
    platform_info, select_strategy,
};

#[derive(Serialize)]
struct InfoReport {
    #[serde(flatten)]
    platform: PlatformInfo,
    runtime_version: Option<Version>,
    strategy: StrategyKind,
    legacy_correction: bool,
}

fn build_report() -> InfoReport {
    let platform = platform_info();
    let runtime_version = platform.kernel_release.as_deref().and_then(Version::parse);
    let strategy = select_strategy(platform.platform, StrategyPreference::Auto);
    let legacy_correction = needs_correction(platform.platform, runtime_version);
    InfoReport {
        platform,
        runtime_version,
        strategy,
        legacy_correction,
    }
}

pub fn run(json: bool) {
    let report = build_report();
    if json {
        super::print_json(&report);
        return;
    }

    let p = &report.platform;
    println!("Platform:        {} ({})", p.platform, p.family);
    println!("Architecture:    {}", p.machine);
    println!(
        "Kernel release:  {}",
        p.kernel_release.as_deref().unwrap_or("unknown")
    );
    println!("Processors:      {}", p.logical_processors);
    println!("Strategy:        {}", report.strategy);
    if report.legacy_correction {
        println!("Correction:      CPU deltas divided by 100 ({LEGACY_PLATFORM} legacy)");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_strategy_follows_platform() {
        let report = build_report();
        let expected = if cfg!(target_os = "linux") {
            StrategyKind::Native
        } else {
            StrategyKind::Computed
        };
        assert_eq!(report.strategy, expected);
    }

    #[test]
    fn report_serializes_flat() {
        let value = serde_json::to_value(build_report()).unwrap();
        assert!(value.get("logical_processors").is_some());
        assert!(value.get("strategy").is_some());
    }
}
