use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tradeoff::{atomic_write, init_logging, load_request, render_output};
use tradeoff_core::{SimulationConfig, StrategyEvaluator, TradeoffError};

#[derive(Parser, Debug)]
#[command(name = "tradeoff")]
#[command(about = "Decide how to split monthly surplus between debt payoff and savings")]
struct Args {
    /// Request file (.yaml/.yml for YAML, anything else is read as JSON)
    request: PathBuf,

    /// Seed for the Monte Carlo random source (default: current time)
    #[arg(long)]
    seed: Option<u64>,

    /// Override the number of Monte Carlo trials
    #[arg(long)]
    simulations: Option<usize>,

    /// Log level (debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Write logs to a daily-rolled file in this directory instead of stderr
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Write the response to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit compact JSON
    #[arg(long)]
    compact: bool,
}

fn main() -> color_eyre::Result<ExitCode> {
    color_eyre::install()?;

    let args = Args::parse();
    let _guard = init_logging(&args.log_level, args.log_dir.as_deref())?;

    let mut request = load_request(&args.request)?;
    if let Some(simulations) = args.simulations {
        let config = request.simulation.take().unwrap_or_default();
        request.simulation = Some(config.with_simulations(simulations));
    }

    let config = SimulationConfig::default();
    let mut evaluator = match args.seed {
        Some(seed) => StrategyEvaluator::with_seed(config, seed),
        None => StrategyEvaluator::with_config(config),
    };

    let output = match evaluator.execute(&request) {
        Ok(output) => output,
        Err(TradeoffError::InvalidInput { reason, message }) => {
            tracing::warn!(%reason, "Request rejected");
            eprintln!("invalid request ({reason}): {message}");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err.into()),
    };

    let json = render_output(&output, args.compact)?;
    match args.output {
        Some(path) => {
            atomic_write(&path, &json)?;
            tracing::info!(path = %path.display(), "Response written");
        }
        None => println!("{json}"),
    }

    Ok(ExitCode::SUCCESS)
}
