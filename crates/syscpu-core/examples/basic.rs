//! Basic CPU sampling example.
//!
//! Registers the whole-machine CPU provider with a collector, takes a few
//! samples one second apart, and prints them.
//!
//! Run: `cargo run --example basic`

use std::time::Duration;

use syscpu_core::{
    MetricsCollector, SYSTEM_CPU_TOTAL_NORM_PCT, SamplerConfig, SystemTotalCpuProvider,
    platform_info,
};

fn main() {
    let info = platform_info();
    println!(
        "Platform: {} ({} processors, kernel {})",
        info.platform,
        info.logical_processors,
        info.kernel_release.as_deref().unwrap_or("unknown")
    );

    let config = SamplerConfig::default();
    let provider = SystemTotalCpuProvider::new(config.clone());
    println!("Strategy: {}", provider.active_strategy());

    let mut collector = MetricsCollector::from_config(&config);
    collector.add_provider(Box::new(provider));

    // The computed strategy only records a baseline on the first cycle.
    let _ = collector.collect_all_metrics();

    for _ in 0..3 {
        std::thread::sleep(Duration::from_secs(1));
        let set = collector.collect_all_metrics();
        match set.value_of(SYSTEM_CPU_TOTAL_NORM_PCT) {
            Some(v) => println!("{SYSTEM_CPU_TOTAL_NORM_PCT} = {:.2}%", v * 100.0),
            None => println!("no sample this cycle"),
        }
    }
}
