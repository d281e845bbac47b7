//! Integration tests for syscpu-core.
//!
//! These run the sampler against the real host:
//! platform detection → strategy selection → sampling → collection.

use std::time::Duration;

use syscpu_core::{
    MetricsCollector, MetricsProvider, Platform, SYSTEM_CPU_TOTAL_NORM_PCT, SamplerConfig,
    StrategyKind, StrategyPreference, SystemTotalCpuProvider, platform_info,
};

fn computed_config() -> SamplerConfig {
    SamplerConfig {
        strategy: StrategyPreference::Computed,
        ..SamplerConfig::default()
    }
}

fn burn(duration: Duration) {
    let start = std::time::Instant::now();
    let mut x: u64 = 0;
    while start.elapsed() < duration {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
    }
    std::hint::black_box(x);
}

#[test]
fn platform_info_is_consistent() {
    let info = platform_info();
    assert_eq!(info.platform, Platform::current());
    assert!(info.logical_processors >= 1);
    assert_eq!(info.system, std::env::consts::OS);
}

#[cfg(unix)]
#[test]
fn computed_first_call_seeds_baseline() {
    let mut provider = SystemTotalCpuProvider::new(computed_config());
    assert_eq!(provider.active_strategy(), StrategyKind::Computed);

    let first = provider.take_sample().unwrap();
    assert!(first.is_empty());
    assert!(provider.state().baseline_established());

    std::thread::sleep(Duration::from_millis(50));
    burn(Duration::from_millis(50));

    let second = provider.take_sample().unwrap();
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].name, SYSTEM_CPU_TOTAL_NORM_PCT);
    assert!(second[0].value.is_finite());
}

#[test]
fn computed_sampler_never_touches_native_counter() {
    let mut provider = SystemTotalCpuProvider::new(computed_config());
    for _ in 0..3 {
        let _ = provider.take_sample().unwrap();
    }
    assert!(!provider.native_counter_initialized());
}

#[cfg(target_os = "linux")]
#[test]
fn native_sampler_reports_fraction_on_linux() {
    let mut provider = SystemTotalCpuProvider::new(SamplerConfig::default());
    assert_eq!(provider.active_strategy(), StrategyKind::Native);

    burn(Duration::from_millis(100));
    let samples = provider.take_sample().unwrap();
    assert_eq!(samples.len(), 1);
    let value = samples[0].value;
    assert!((0.0..=1.0).contains(&value), "value out of range: {value}");
    assert!(provider.native_counter_initialized());

    burn(Duration::from_millis(100));
    let again = provider.take_sample().unwrap();
    assert_eq!(again.len(), 1);
}

#[cfg(unix)]
#[test]
fn collector_gathers_from_real_provider() {
    let config = computed_config();
    let mut collector = MetricsCollector::from_config(&config);
    collector.add_provider(Box::new(SystemTotalCpuProvider::new(config)));

    let first = collector.collect_all_metrics();
    assert!(first.samples.is_empty());

    std::thread::sleep(Duration::from_millis(50));
    let second = collector.collect_all_metrics();
    assert!(second.value_of(SYSTEM_CPU_TOTAL_NORM_PCT).is_some());
    assert_eq!(collector.active_provider_count(), 1);
}

#[test]
fn provider_failure_counter_is_externally_settable() {
    let mut provider = SystemTotalCpuProvider::default();
    assert_eq!(provider.consecutive_failed_reads(), 0);
    provider.set_consecutive_failed_reads(3);
    assert_eq!(provider.consecutive_failed_reads(), 3);
    assert_eq!(provider.dbg_name(), "total system CPU time");
}

#[test]
fn clamped_config_keeps_values_in_unit_range() {
    let config = SamplerConfig {
        clamp_to_unit_range: true,
        ..computed_config()
    };
    let mut provider = SystemTotalCpuProvider::new(config);
    let _ = provider.take_sample().unwrap();
    for _ in 0..3 {
        std::thread::sleep(Duration::from_millis(20));
        for s in provider.take_sample().unwrap() {
            assert!((0.0..=1.0).contains(&s.value));
        }
    }
}
