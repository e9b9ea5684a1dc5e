//! delve-sim: run a small colony headlessly.
//!
//! - `delve-sim run` simulates the configured colony and prints a summary
//! - `delve-sim check` validates a config file and prints it back resolved

mod behaviors;
mod colony;
mod config;
mod sim;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use crate::config::SimConfig;

#[derive(Parser)]
#[command(name = "delve-sim")]
#[command(about = "Headless colony runner for the delve creature AI", version)]
struct Cli {
    /// YAML colony config (defaults are used when omitted)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Simulate the colony
    Run {
        /// Override the number of ticks
        #[arg(long)]
        ticks: Option<u64>,

        /// Override the world seed
        #[arg(long)]
        seed: Option<u64>,

        /// Override the planner worker count (0 plans inline)
        #[arg(long)]
        workers: Option<usize>,

        /// Print the summary as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a config and print it resolved
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    fmt().with_env_filter(filter).with_target(false).init();

    let mut config = SimConfig::load_or_default(cli.config.as_deref())?;

    match cli.command.unwrap_or(Commands::Run {
        ticks: None,
        seed: None,
        workers: None,
        json: false,
    }) {
        Commands::Run {
            ticks,
            seed,
            workers,
            json,
        } => {
            if let Some(ticks) = ticks {
                config.ticks = ticks;
            }
            if let Some(seed) = seed {
                config.seed = seed;
            }
            if let Some(workers) = workers {
                config.planner.workers = workers;
            }
            config.validate()?;
            run(&config, json)
        }
        Commands::Check => {
            config.validate()?;
            let yaml = serde_yaml::to_string(&config).context("Failed to render config")?;
            print!("{yaml}");
            Ok(())
        }
    }
}

fn run(config: &SimConfig, json: bool) -> Result<()> {
    let summary = sim::run(config)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
        return Ok(());
    }

    info!(
        ticks = summary.ticks,
        ore_remaining = summary.ore_remaining,
        "colony finished"
    );
    println!("Colony after {} ticks (seed {})", summary.ticks, summary.seed);
    println!("  ore remaining: {}", summary.ore_remaining);
    for colonist in &summary.colonists {
        println!(
            "  colonist {} at {}: mined {}, walked {}, tasks done {}, failed {}, plans {}",
            colonist.id,
            colonist.position,
            colonist.mined,
            colonist.steps,
            colonist.tasks_done,
            colonist.tasks_failed,
            colonist.plans_requested,
        );
    }
    Ok(())
}
