//! `syscpu watch`: periodic collection until Ctrl+C or a cycle limit.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use syscpu_core::{
    MetricSet, MetricsCollector, SYSTEM_CPU_TOTAL_NORM_PCT, SamplerConfig, SystemTotalCpuProvider,
};

use super::{ConfigOverrides, format_percent, resolve_config_or_exit};

const SLEEP_SLICE: Duration = Duration::from_millis(100);

pub struct WatchCommandConfig<'a> {
    pub overrides: ConfigOverrides<'a>,
    pub interval_sec: Option<f64>,
    pub count: u64,
    pub output_path: Option<&'a str>,
}

/// Cycle interval: the flag when valid, otherwise the config value.
fn resolve_interval(interval_sec: Option<f64>, config: &SamplerConfig) -> Duration {
    let Some(s) = interval_sec else {
        return config.interval();
    };
    match Duration::try_from_secs_f64(s) {
        Ok(d) if !d.is_zero() => d,
        _ => {
            eprintln!(
                "Warning: ignoring invalid interval {s}s, using {}ms",
                config.interval_ms
            );
            config.interval()
        }
    }
}

fn open_output(path: &str) -> std::io::Result<BufWriter<File>> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    Ok(BufWriter::new(file))
}

fn write_line(out: &mut impl Write, set: &MetricSet) -> std::io::Result<()> {
    let line = serde_json::to_string(set).map_err(std::io::Error::other)?;
    writeln!(out, "{line}")?;
    out.flush()
}

/// Sleep for `total`, waking early once `running` is cleared.
fn interruptible_sleep(total: Duration, running: &AtomicBool) {
    let deadline = Instant::now() + total;
    while running.load(Ordering::SeqCst) {
        let now = Instant::now();
        if now >= deadline {
            break;
        }
        std::thread::sleep((deadline - now).min(SLEEP_SLICE));
    }
}

pub fn run(cfg: WatchCommandConfig<'_>) {
    let config = resolve_config_or_exit(cfg.overrides);
    let interval = resolve_interval(cfg.interval_sec, &config);

    let mut output = match cfg.output_path.map(open_output).transpose() {
        Ok(o) => o,
        Err(e) => {
            eprintln!("Error opening output file: {e}");
            std::process::exit(1);
        }
    };

    let provider = SystemTotalCpuProvider::new(config.clone());
    let strategy = provider.active_strategy();
    let mut collector = MetricsCollector::from_config(&config);
    collector.add_provider(Box::new(provider));

    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    }) {
        eprintln!("Warning: could not install Ctrl+C handler: {e}");
    }

    println!("Watching {SYSTEM_CPU_TOTAL_NORM_PCT}");
    println!("  Strategy:  {strategy}");
    println!("  Interval:  {}ms", interval.as_millis());
    if cfg.count > 0 {
        println!("  Cycles:    {}", cfg.count);
    } else {
        println!("  Cycles:    until Ctrl+C");
    }
    if let Some(path) = cfg.output_path {
        println!("  Output:    {path}");
    }
    println!();

    let mut cycles: u64 = 0;
    let mut disabled = false;

    while running.load(Ordering::SeqCst) {
        let set = collector.collect_all_metrics();
        cycles += 1;

        match set.value_of(SYSTEM_CPU_TOTAL_NORM_PCT) {
            Some(v) => println!("[{cycles:>4}] {v:.4}  ({})", format_percent(v)),
            None => println!("[{cycles:>4}] no sample"),
        }

        if let Some(out) = output.as_mut()
            && !set.samples.is_empty()
            && let Err(e) = write_line(out, &set)
        {
            eprintln!("Error writing output: {e}");
            std::process::exit(1);
        }

        if collector.active_provider_count() == 0 {
            disabled = true;
            break;
        }
        if cfg.count > 0 && cycles >= cfg.count {
            break;
        }
        interruptible_sleep(interval, &running);
    }

    println!("\nStopped after {cycles} cycle(s)");
    if disabled {
        eprintln!(
            "Error: CPU provider disabled after {} consecutive failures",
            collector.max_consecutive_failures()
        );
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syscpu_core::MetricSample;

    #[test]
    fn interval_flag_overrides_config() {
        let c = SamplerConfig::default();
        assert_eq!(resolve_interval(Some(0.5), &c), Duration::from_millis(500));
        assert_eq!(resolve_interval(None, &c), c.interval());
    }

    #[test]
    fn invalid_interval_falls_back_to_config() {
        let c = SamplerConfig::default();
        assert_eq!(resolve_interval(Some(0.0), &c), c.interval());
        assert_eq!(resolve_interval(Some(-1.0), &c), c.interval());
        assert_eq!(resolve_interval(Some(f64::NAN), &c), c.interval());
    }

    #[test]
    fn output_lines_append_as_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cpu.jsonl");
        let path_str = path.to_str().unwrap();

        for v in [0.25, 0.5] {
            let mut out = open_output(path_str).unwrap();
            let set = MetricSet {
                timestamp_unix_ms: 1,
                samples: vec![MetricSample::new(SYSTEM_CPU_TOTAL_NORM_PCT, v)],
            };
            write_line(&mut out, &set).unwrap();
        }

        let contents = std::fs::read_to_string(&path).unwrap();
        let values: Vec<f64> = contents
            .lines()
            .map(|l| {
                let set: MetricSet = serde_json::from_str(l).unwrap();
                set.value_of(SYSTEM_CPU_TOTAL_NORM_PCT).unwrap()
            })
            .collect();
        assert_eq!(values, vec![0.25, 0.5]);
    }

    #[test]
    fn sleep_returns_early_when_stopped() {
        let running = AtomicBool::new(false);
        let start = Instant::now();
        interruptible_sleep(Duration::from_secs(5), &running);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
