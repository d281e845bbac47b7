pub mod info;
pub mod sample;
pub mod watch;

use std::path::Path;

use syscpu_core::{SamplerConfig, StrategyPreference, load_config_from_path};

/// Command-line values layered over the config file.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigOverrides<'a> {
    pub config_path: Option<&'a str>,
    pub strategy: Option<StrategyPreference>,
    pub clamp: bool,
}

/// Load the config file (if any) and apply flag overrides.
pub fn resolve_config(overrides: ConfigOverrides<'_>) -> std::io::Result<SamplerConfig> {
    let base = match overrides.config_path {
        Some(path) => load_config_from_path(Path::new(path))?,
        None => SamplerConfig::default(),
    };
    Ok(apply_overrides(base, overrides))
}

fn apply_overrides(mut config: SamplerConfig, overrides: ConfigOverrides<'_>) -> SamplerConfig {
    if let Some(strategy) = overrides.strategy {
        config.strategy = strategy;
    }
    if overrides.clamp {
        config.clamp_to_unit_range = true;
    }
    config
}

/// Same as [`resolve_config`], exiting with status 1 on failure.
pub fn resolve_config_or_exit(overrides: ConfigOverrides<'_>) -> SamplerConfig {
    match resolve_config(overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Error loading config {}: {e}",
                overrides.config_path.unwrap_or("<default>")
            );
            std::process::exit(1);
        }
    }
}

/// Pretty-print a value as JSON to stdout.
pub fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(s) => println!("{s}"),
        Err(e) => {
            eprintln!("Error serializing JSON: {e}");
            std::process::exit(1);
        }
    }
}

/// Format a usage fraction as a percentage.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
