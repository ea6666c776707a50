//! Price command implementation
//!
//! Values every leg of a request with Greeks and prints per-leg results and
//! totals.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pricer_risk::portfolio::{price_portfolio, price_portfolio_price_only};
use tracing::info;

use super::load_request;
use crate::output::{write_valuation, Format};
use crate::Result;

/// Arguments of `pricer price`.
#[derive(Debug, Clone, Args)]
pub struct PriceArgs {
    /// Request file (JSON `{market, legs}`), `-` for stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Abort on the first failing leg
    #[arg(long)]
    pub strict: bool,

    /// Skip Greeks
    #[arg(long)]
    pub price_only: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

/// Run the price command
pub fn run<W: Write>(args: &PriceArgs, out: &mut W) -> Result<()> {
    let request = load_request(&args.input)?;
    info!(legs = request.legs.len(), strict = args.strict, "pricing portfolio");

    let valuation = if args.price_only {
        price_portfolio_price_only(&request.market, &request.legs, args.strict)?
    } else {
        price_portfolio(&request.market, &request.legs, args.strict)?
    };

    info!(
        total_price = valuation.total_price,
        ok = valuation.summary.ok,
        error = valuation.summary.error,
        "pricing complete"
    );
    write_valuation(out, &valuation, args.format)
}
