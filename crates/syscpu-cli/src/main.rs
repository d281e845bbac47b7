//! CLI for syscpu: whole-machine normalized CPU utilization.

mod commands;

use clap::{Parser, Subcommand};
use syscpu_core::StrategyPreference;

#[derive(Parser)]
#[command(name = "syscpu")]
#[command(about = "syscpu: sample whole-machine CPU utilization")]
#[command(version = syscpu_core::VERSION)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show platform details and the strategy that would be used
    Info {
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },

    /// Take a single CPU utilization sample
    Sample {
        /// Strategy: auto (platform rule), native, computed
        #[arg(long)]
        strategy: Option<StrategyPreference>,

        /// Path to a sampler config JSON file
        #[arg(long)]
        config: Option<String>,

        /// Wait between priming and sampling, in milliseconds
        #[arg(long, default_value = "1000")]
        warmup_ms: u64,

        /// Clamp the value into [0, 1]
        #[arg(long)]
        clamp: bool,

        /// Print the sample as JSON
        #[arg(long)]
        json: bool,
    },

    /// Sample repeatedly through the collector
    Watch {
        /// Seconds between cycles (default: config interval)
        #[arg(long)]
        interval_sec: Option<f64>,

        /// Stop after this many cycles (0 = until Ctrl+C)
        #[arg(long, default_value = "0")]
        count: u64,

        /// Append each cycle as a JSON line to this file
        #[arg(long)]
        output: Option<String>,

        /// Strategy: auto (platform rule), native, computed
        #[arg(long)]
        strategy: Option<StrategyPreference>,

        /// Path to a sampler config JSON file
        #[arg(long)]
        config: Option<String>,

        /// Clamp values into [0, 1]
        #[arg(long)]
        clamp: bool,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Info { json } => commands::info::run(json),
        Commands::Sample {
            strategy,
            config,
            warmup_ms,
            clamp,
            json,
        } => commands::sample::run(commands::sample::SampleCommandConfig {
            overrides: commands::ConfigOverrides {
                config_path: config.as_deref(),
                strategy,
                clamp,
            },
            warmup_ms,
            json,
        }),
        Commands::Watch {
            interval_sec,
            count,
            output,
            strategy,
            config,
            clamp,
        } => commands::watch::run(commands::watch::WatchCommandConfig {
            overrides: commands::ConfigOverrides {
                config_path: config.as_deref(),
                strategy,
                clamp,
            },
            interval_sec,
            count,
            output_path: output.as_deref(),
        }),
    }
}
