//! Spot × vol scenario grid.
//!
//! Each cell re-prices the whole portfolio (price only, no shared draw
//! cache) on a shifted market:
//!
//! ```text
//! spot = S · (1 + spot_shift_pct / 100)
//! vol  = max(σ + vol_shift, 1e-8)
//! rate = r + rate_shift_bps / 10_000
//! ```

use std::time::Instant;

use pricer_core::types::{MarketState, PricingError};
use pricer_models::instruments::{InstrumentLeg, LegRequest};
use pricer_pricing::pricer::price_product;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::parallel::{ordered_map, ParallelConfig};
use crate::portfolio::PortfolioError;

/// Maximum entries on either axis.
pub const MAX_AXIS_LEN: usize = 25;
/// Maximum number of cells.
pub const MAX_GRID_CELLS: usize = 225;
/// Floor applied to shifted volatility.
pub const VOL_FLOOR: f64 = 1e-8;

/// Portfolio totals over a spot × vol grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioGrid {
    /// Spot shifts in percent (columns)
    pub spot_shifts_pct: Vec<f64>,
    /// Absolute vol shifts (rows)
    pub vol_shifts: Vec<f64>,
    /// Rate shift applied to every cell, in basis points
    pub rate_shift_bps: f64,
    /// Unshifted price-only total
    pub base_total: f64,
    /// `totals[vol_index][spot_index]`
    pub totals: Vec<Vec<f64>>,
}

impl ScenarioGrid {
    /// Total at a cell.
    pub fn total(&self, vol_index: usize, spot_index: usize) -> Option<f64> {
        self.totals.get(vol_index)?.get(spot_index).copied()
    }

    /// Cell total minus the base total.
    pub fn pnl(&self, vol_index: usize, spot_index: usize) -> Option<f64> {
        self.total(vol_index, spot_index).map(|t| t - self.base_total)
    }
}

/// Computes a scenario grid with the default [`ParallelConfig`].
///
/// # Errors
/// `PortfolioError::InvalidGrid` if an axis is empty, longer than
/// [`MAX_AXIS_LEN`], the grid exceeds [`MAX_GRID_CELLS`], a shift is not
/// finite, or a spot shift is ≤ −100%.
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::MarketState;
/// use pricer_models::instruments::{LegParams, LegRequest};
/// use pricer_risk::scenarios::scenario_grid;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let params = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
/// let legs = vec![LegRequest::new("c", "vanilla", "black_scholes", 1.0, params)];
///
/// let grid = scenario_grid(&market, &legs, &[-10.0, 0.0, 10.0], &[0.0, 0.05], 0.0).unwrap();
/// assert_eq!(grid.totals.len(), 2);
/// assert_eq!(grid.totals[0].len(), 3);
/// assert!((grid.totals[0][1] - grid.base_total).abs() < 1e-12);
/// assert!(grid.totals[0][2] > grid.totals[0][0]);
/// ```
pub fn scenario_grid(
    market: &MarketState,
    legs: &[LegRequest],
    spot_shifts_pct: &[f64],
    vol_shifts: &[f64],
    rate_shift_bps: f64,
) -> Result<ScenarioGrid, PortfolioError> {
    scenario_grid_with_config(
        market,
        legs,
        spot_shifts_pct,
        vol_shifts,
        rate_shift_bps,
        &ParallelConfig::default(),
    )
}

/// Computes a scenario grid, parallelising rows when the cell count reaches
/// `config.parallel_threshold`.
pub fn scenario_grid_with_config(
    market: &MarketState,
    legs: &[LegRequest],
    spot_shifts_pct: &[f64],
    vol_shifts: &[f64],
    rate_shift_bps: f64,
    config: &ParallelConfig,
) -> Result<ScenarioGrid, PortfolioError> {
    validate_axes(spot_shifts_pct, vol_shifts, rate_shift_bps)?;
    let started = Instant::now();

    let parsed: Vec<InstrumentLeg> = legs
        .iter()
        .filter_map(|req| match req.parse() {
            Ok(leg) => Some(leg),
            Err(err) => {
                warn!(leg_id = %req.leg_id, error = %err, "scenario grid skipping leg");
                None
            }
        })
        .collect();

    let base_total = portfolio_total(&parsed, market);
    let rate = market.rate() + rate_shift_bps / 10_000.0;
    let cells = spot_shifts_pct.len() * vol_shifts.len();

    let totals = ordered_map(vol_shifts, cells, config, |&dv| {
        let vol = (market.vol() + dv).max(VOL_FLOOR);
        spot_shifts_pct
            .iter()
            .map(|&pct| {
                let spot = market.spot() * (1.0 + pct / 100.0);
                match MarketState::new(spot, rate, market.dividend_yield(), vol) {
                    Ok(shifted) => portfolio_total(&parsed, &shifted),
                    Err(err) => {
                        warn!(spot, vol, rate, error = %err, "scenario grid cell skipped");
                        0.0
                    }
                }
            })
            .collect::<Vec<f64>>()
    });

    debug!(
        legs = parsed.len(),
        cells,
        parallel = config.should_parallelize(cells),
        elapsed_ms = started.elapsed().as_secs_f64() * 1e3,
        "scenario grid evaluated"
    );

    Ok(ScenarioGrid {
        spot_shifts_pct: spot_shifts_pct.to_vec(),
        vol_shifts: vol_shifts.to_vec(),
        rate_shift_bps,
        base_total,
        totals,
    })
}

fn portfolio_total(legs: &[InstrumentLeg], market: &MarketState) -> f64 {
    legs.iter()
        .filter_map(|leg| match price_leg(leg, market) {
            Ok(price) => Some(price * leg.quantity()),
            Err(err) => {
                debug!(leg_id = leg.leg_id(), error = %err, "scenario leg failed to price");
                None
            }
        })
        .sum()
}

#[inline]
fn price_leg(leg: &InstrumentLeg, market: &MarketState) -> Result<f64, PricingError> {
    price_product(leg.product(), market, None)
}

fn validate_axes(spot_shifts_pct: &[f64], vol_shifts: &[f64], rate_shift_bps: f64) -> Result<(), PortfolioError> {
    for (name, axis) in [("spot_shifts_pct", spot_shifts_pct), ("vol_shifts", vol_shifts)] {
        if axis.is_empty() || axis.len() > MAX_AXIS_LEN {
            return Err(PortfolioError::InvalidGrid(format!(
                "{} must have 1..={} entries (got {})",
                name,
                MAX_AXIS_LEN,
                axis.len()
            )));
        }
        if let Some(bad) = axis.iter().find(|x| !x.is_finite()) {
            return Err(PortfolioError::InvalidGrid(format!("{} contains non-finite value {}", name, bad)));
        }
    }
    let cells = spot_shifts_pct.len() * vol_shifts.len();
    if cells > MAX_GRID_CELLS {
        return Err(PortfolioError::InvalidGrid(format!(
            "grid has {} cells, limit is {}",
            cells, MAX_GRID_CELLS
        )));
    }
    if let Some(bad) = spot_shifts_pct.iter().find(|&&pct| pct <= -100.0) {
        return Err(PortfolioError::InvalidGrid(format!(
            "spot shift {}% would make spot non-positive",
            bad
        )));
    }
    if !rate_shift_bps.is_finite() {
        return Err(PortfolioError::InvalidGrid("rate_shift_bps must be finite".to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_models::instruments::LegParams;

    fn market() -> MarketState {
        MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap()
    }

    fn call(qty: f64) -> LegRequest {
        let params = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
        LegRequest::new("c", "vanilla", "black_scholes", qty, params)
    }

    #[test]
    fn test_axis_limits() {
        let legs = vec![call(1.0)];
        let long: Vec<f64> = (0..26).map(|i| i as f64).collect();
        assert!(scenario_grid(&market(), &legs, &[], &[0.0], 0.0).is_err());
        assert!(scenario_grid(&market(), &legs, &long, &[0.0], 0.0).is_err());
        assert!(scenario_grid(&market(), &legs, &[0.0], &long, 0.0).is_err());

        let full: Vec<f64> = (0..15).map(|i| i as f64).collect();
        assert!(scenario_grid(&market(), &legs, &full, &full, 0.0).is_ok());
        let wide: Vec<f64> = (0..16).map(|i| i as f64).collect();
        assert!(matches!(
            scenario_grid(&market(), &legs, &wide, &full, 0.0),
            Err(PortfolioError::InvalidGrid(_))
        ));
    }

    #[test]
    fn test_rejects_wipeout_spot_shift() {
        let err = scenario_grid(&market(), &[call(1.0)], &[-100.0, 0.0], &[0.0], 0.0).unwrap_err();
        assert!(err.to_string().contains("-100"));
        assert!(scenario_grid(&market(), &[call(1.0)], &[f64::NAN], &[0.0], 0.0).is_err());
    }

    #[test]
    fn test_vol_is_floored() {
        let grid = scenario_grid(&market(), &[call(1.0)], &[0.0], &[-0.5], 0.0).unwrap();
        // zero vol call is worth its discounted forward intrinsic
        let expected = 100.0 - 100.0 * (-0.05f64).exp();
        assert_relative_eq!(grid.totals[0][0], expected, epsilon = 1e-6);
    }

    #[test]
    fn test_rate_shift_applied() {
        let base = scenario_grid(&market(), &[call(1.0)], &[0.0], &[0.0], 0.0).unwrap();
        let up = scenario_grid(&market(), &[call(1.0)], &[0.0], &[0.0], 100.0).unwrap();
        let direct = MarketState::new(100.0, 0.06, 0.0, 0.2).unwrap();
        let expected = portfolio_total(&[call(1.0).parse().unwrap()], &direct);
        assert_relative_eq!(up.totals[0][0], expected, epsilon = 1e-12);
        assert!(up.totals[0][0] > base.totals[0][0]);
        assert_relative_eq!(up.base_total, base.base_total);
    }

    #[test]
    fn test_invalid_legs_skipped() {
        let bad = LegRequest::new("b", "barrier", "black_scholes", 1.0, LegParams::new());
        let with_bad = scenario_grid(&market(), &[call(2.0), bad], &[0.0, 5.0], &[0.0], 0.0).unwrap();
        let clean = scenario_grid(&market(), &[call(2.0)], &[0.0, 5.0], &[0.0], 0.0).unwrap();
        assert_eq!(with_bad, clean);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let legs = vec![call(1.0), call(-0.5)];
        let spots: Vec<f64> = (-4..=4).map(|i| i as f64 * 5.0).collect();
        let vols = [-0.1, 0.0, 0.1];
        let seq =
            scenario_grid_with_config(&market(), &legs, &spots, &vols, 0.0, &ParallelConfig::sequential()).unwrap();
        let par = scenario_grid_with_config(&market(), &legs, &spots, &vols, 0.0, &ParallelConfig::new(1)).unwrap();
        assert_eq!(seq, par);
        assert_eq!(seq.pnl(1, 4), Some(0.0));
        assert_eq!(seq.total(3, 0), None);
    }
}
