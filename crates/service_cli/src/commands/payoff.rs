//! Payoff command implementation
//!
//! Prints the P&L at expiry of a request over a spot ladder. Without
//! `--premium` the premium is the portfolio's current price-only total.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pricer_risk::payoff::{pnl_profile, spot_ladder};
use pricer_risk::portfolio::price_portfolio_price_only;
use tracing::info;

use super::load_request;
use crate::config::EngineConfig;
use crate::output::{write_pnl, Format};
use crate::Result;

/// Arguments of `pricer payoff`.
#[derive(Debug, Clone, Args)]
pub struct PayoffArgs {
    /// Request file (JSON `{market, legs}`), `-` for stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Lowest terminal spot
    #[arg(long)]
    pub spot_min: f64,

    /// Highest terminal spot
    #[arg(long)]
    pub spot_max: f64,

    /// Number of ladder points (default from config)
    #[arg(long)]
    pub steps: Option<usize>,

    /// Premium paid for the position (default: current portfolio value)
    #[arg(long, allow_negative_numbers = true)]
    pub premium: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

/// Run the payoff command
pub fn run<W: Write>(args: &PayoffArgs, config: &EngineConfig, out: &mut W) -> Result<()> {
    let request = load_request(&args.input)?;
    let spots = spot_ladder(args.spot_min, args.spot_max, args.steps.unwrap_or(config.payoff_steps))?;

    let premium = match args.premium {
        Some(premium) => premium,
        None => price_portfolio_price_only(&request.market, &request.legs, false)?.total_price,
    };
    info!(premium, points = spots.len(), "computing payoff profile");

    let profile = pnl_profile(&request.legs, premium, &spots);
    write_pnl(out, &profile, args.format)
}
