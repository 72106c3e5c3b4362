use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use tracing::debug;

use pump_status::config::Config;
use pump_status::display::render;
use pump_status::invariants;
use pump_status::logic::offset_by_seconds;
use pump_status::logging::init_logging;
use pump_status::simulator;
use pump_status::types::{Battery, PumpSnapshot, Reservoir};

#[derive(Parser)]
#[command(name = "pump-status-sim", about = "Pump header status renderer and simulator")]
struct Cli {
    /// YAML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run random event traces and check the display invariants
    Simulate {
        #[arg(long)]
        max_steps: Option<usize>,
        #[arg(long)]
        max_samples: Option<usize>,
        #[arg(long)]
        seed: Option<u64>,
        /// Print the first trace step by step
        #[arg(short, long)]
        verbose: bool,
    },
    /// Render a single header status
    Render {
        /// Insulin units left in the reservoir
        #[arg(long, conflicts_with = "overfull")]
        reservoir: Option<f64>,
        /// Reservoir holds more than the pump can measure
        #[arg(long)]
        overfull: bool,
        /// Battery percent
        #[arg(long)]
        battery: Option<f64>,
        /// The pump's battery is not user-serviceable
        #[arg(long)]
        battery_hidden: bool,
        /// Seconds until the pod expires (negative if already expired)
        #[arg(long, allow_hyphen_values = true)]
        expires_in: Option<i64>,
        /// Highlight message replacing all readouts
        #[arg(long)]
        message: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    init_logging(&config.logging)?;

    match cli.command {
        Command::Simulate {
            max_steps,
            max_samples,
            seed,
            verbose,
        } => {
            let max_steps = max_steps.unwrap_or(config.simulation.max_steps);
            let max_samples = max_samples.unwrap_or(config.simulation.max_samples);
            let seed = seed.or(config.simulation.seed).unwrap_or_else(|| {
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .map(|d| d.as_nanos() as u64)
                    .unwrap_or(0)
            });

            println!("Pump Status Simulator");
            println!("=====================");
            println!(
                "Running {} traces of {} steps each (seed: {})",
                max_samples, max_steps, seed
            );
            if verbose {
                println!("Verbose mode: showing first trace\n");
            }

            println!("Checking invariants:");
            for (name, _) in invariants::ALL_INVARIANTS {
                println!("  - {}", name);
            }
            println!("  - tickNeverRelaxesTimer");

            let result = simulator::run_simulation(
                max_steps,
                max_samples,
                seed,
                &config.thresholds,
                verbose,
            );
            println!("{}", result);
            if result.violation.is_some() {
                anyhow::bail!("invariant violated");
            }
        }
        Command::Render {
            reservoir,
            overfull,
            battery,
            battery_hidden,
            expires_in,
            message,
        } => {
            let now = Utc::now();
            let reservoir = if overfull {
                Some(Reservoir::Overfull)
            } else {
                reservoir.map(Reservoir::from_units).transpose()?
            };
            let battery = battery
                .map(|p| Battery::new(Some(p), !battery_hidden))
                .transpose()?;
            let expires_at = expires_in
                .map(|secs| {
                    offset_by_seconds(now, secs)
                        .with_context(|| format!("--expires-in {} is out of range", secs))
                })
                .transpose()?;
            let snapshot = PumpSnapshot {
                reservoir,
                battery,
                expires_at,
                now,
                highlight: message,
            };
            debug!(?snapshot, "rendering");
            println!("{}", render(&snapshot, &config.thresholds));
        }
    }

    Ok(())
}
