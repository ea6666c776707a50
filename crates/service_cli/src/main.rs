//! Pricer CLI - portfolio pricing, scenario grids and payoff profiles
//!
//! # Commands
//!
//! - `pricer price --input <request.json>` - Price a portfolio with Greeks
//! - `pricer grid --input <request.json>` - Spot × vol scenario grid
//! - `pricer payoff --input <request.json> --spot-min a --spot-max b` - P&L at expiry
//! - `pricer catalog` - Supported instrument/method pairs as JSON
//!
//! # Configuration
//!
//! `pricer.toml` (or `--config <file>`), then `PRICER_*` environment
//! variables, then flags. `RUST_LOG` overrides the configured log level.

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use service_cli::commands::{self, grid::GridArgs, payoff::PayoffArgs, price::PriceArgs};
use service_cli::config::{build_config, CliOverrides, LogLevel};
use service_cli::Result;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Derivatives pricing, Greeks and portfolio analytics
#[derive(Parser)]
#[command(name = "pricer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path [default: pricer.toml if present]
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Minimum grid cells before rows are priced in parallel
    #[arg(long, global = true)]
    parallel_threshold: Option<usize>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a portfolio of legs with Greeks
    Price(PriceArgs),

    /// Re-price a portfolio over spot × vol shifts
    Grid(GridArgs),

    /// P&L at expiry over a spot ladder
    Payoff(PayoffArgs),

    /// Print the instrument/method catalog as JSON
    Catalog,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        config_file: cli.config.clone(),
        log_level: cli.verbose.then_some(LogLevel::Debug),
        parallel_threshold: cli.parallel_threshold,
    };
    let config = build_config(&overrides)?;

    init_tracing(config.log_level.as_filter_str());
    debug!(?config, "configuration loaded");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match &cli.command {
        Commands::Price(args) => commands::price::run(args, &mut out)?,
        Commands::Grid(args) => commands::grid::run(args, &config, &mut out)?,
        Commands::Payoff(args) => commands::payoff::run(args, &config, &mut out)?,
        Commands::Catalog => commands::catalog::run(&mut out)?,
    }
    out.flush()?;
    Ok(())
}
