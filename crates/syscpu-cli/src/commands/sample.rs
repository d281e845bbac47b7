//! `syscpu sample`: one primed CPU utilization sample.

use std::time::{Duration, SystemTime};

use syscpu_core::{
    MetricSample, MetricSet, SYSTEM_CPU_TOTAL_NORM_PCT, SampleError, SystemTotalCpuProvider,
};

use super::{ConfigOverrides, format_percent, print_json, resolve_config_or_exit};

pub struct SampleCommandConfig<'a> {
    pub overrides: ConfigOverrides<'a>,
    pub warmup_ms: u64,
    pub json: bool,
}

/// Prime the provider, wait, then take the reported sample.
fn primed_sample(
    provider: &mut SystemTotalCpuProvider,
    warmup: Duration,
) -> Result<Vec<MetricSample>, SampleError> {
    let priming = provider.take_sample()?;
    log::debug!(
        "priming call returned {} sample(s); waiting {}ms",
        priming.len(),
        warmup.as_millis()
    );
    std::thread::sleep(warmup);
    provider.take_sample()
}

pub fn run(cfg: SampleCommandConfig<'_>) {
    let config = resolve_config_or_exit(cfg.overrides);
    let mut provider = SystemTotalCpuProvider::new(config);
    let strategy = provider.active_strategy();

    let samples = match primed_sample(&mut provider, Duration::from_millis(cfg.warmup_ms)) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error sampling CPU ({strategy} strategy): {e}");
            std::process::exit(1);
        }
    };

    let set = MetricSet::new(SystemTime::now(), samples);
    if cfg.json {
        print_json(&set);
        return;
    }

    match set.value_of(SYSTEM_CPU_TOTAL_NORM_PCT) {
        Some(v) => println!(
            "{SYSTEM_CPU_TOTAL_NORM_PCT}: {v:.4} ({}, {strategy})",
            format_percent(v)
        ),
        None => {
            eprintln!("No sample produced ({strategy} strategy)");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syscpu_core::{SamplerConfig, StrategyPreference};

    #[cfg(unix)]
    #[test]
    fn computed_primed_sample_yields_one_value() {
        let mut provider = SystemTotalCpuProvider::new(SamplerConfig {
            strategy: StrategyPreference::Computed,
            ..SamplerConfig::default()
        });
        let samples = primed_sample(&mut provider, Duration::from_millis(20)).unwrap();
        assert_eq!(samples.len(), 1);
        assert_eq!(samples[0].name, SYSTEM_CPU_TOTAL_NORM_PCT);
    }
}
