//! Grid command implementation
//!
//! Re-prices a request over spot × vol shifts. Shifts not given on the
//! command line come from the engine configuration.

use std::io::Write;
use std::path::PathBuf;

use clap::Args;
use pricer_risk::scenarios::scenario_grid_with_config;
use tracing::info;

use super::load_request;
use crate::config::EngineConfig;
use crate::output::{write_grid, Format};
use crate::Result;

/// Arguments of `pricer grid`.
#[derive(Debug, Clone, Args)]
pub struct GridArgs {
    /// Request file (JSON `{market, legs}`), `-` for stdin
    #[arg(short, long)]
    pub input: PathBuf,

    /// Spot shifts in percent, comma-separated
    #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
    pub spot_shifts: Option<Vec<f64>>,

    /// Absolute vol shifts, comma-separated
    #[arg(long, value_delimiter = ',', num_args = 1.., allow_negative_numbers = true)]
    pub vol_shifts: Option<Vec<f64>>,

    /// Parallel rate shift in basis points
    #[arg(long, allow_negative_numbers = true)]
    pub rate_shift_bps: Option<f64>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = Format::Table)]
    pub format: Format,
}

/// Run the grid command
pub fn run<W: Write>(args: &GridArgs, config: &EngineConfig, out: &mut W) -> Result<()> {
    let request = load_request(&args.input)?;
    let spot_shifts = args.spot_shifts.as_deref().unwrap_or(config.spot_shifts_pct.as_slice());
    let vol_shifts = args.vol_shifts.as_deref().unwrap_or(config.vol_shifts.as_slice());
    let rate_shift_bps = args.rate_shift_bps.unwrap_or(config.rate_shift_bps);

    info!(
        spots = spot_shifts.len(),
        vols = vol_shifts.len(),
        rate_shift_bps,
        "computing scenario grid"
    );
    let grid = scenario_grid_with_config(
        &request.market,
        &request.legs,
        spot_shifts,
        vol_shifts,
        rate_shift_bps,
        &config.parallel(),
    )?;
    write_grid(out, &grid, args.format)
}
