//! P&L at expiry: payoff minus premium, extremes and breakevens.

use pricer_models::instruments::{InstrumentType, LegRequest};
use serde::{Deserialize, Serialize};

use super::curve::{payoff_curve, PayoffCurve};

/// Breakevens closer than this to the previous one are dropped.
pub const BREAKEVEN_DEDUP_TOL: f64 = 1e-6;
/// Slope above which the upside is treated as unlimited.
pub const UNLIMITED_SLOPE_TOL: f64 = 1e-9;

/// P&L at expiry over a spot ladder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PnlProfile {
    /// Payoff curve the P&L is read from
    pub curve: PayoffCurve,
    /// Premium paid (negative if received)
    pub premium: f64,
    /// `payoff − premium` at each spot
    pub pnl: Vec<f64>,
    /// Largest P&L on the ladder (0 for an empty ladder)
    pub max_pnl: f64,
    /// Smallest P&L on the ladder (0 for an empty ladder)
    pub min_pnl: f64,
    /// Spots where P&L crosses or touches zero, ascending
    pub breakevens: Vec<f64>,
    /// `max_pnl`, or `None` when the upside is unlimited
    pub max_profit: Option<f64>,
    /// `−min_pnl` when negative, else 0
    pub max_loss: f64,
}

impl PnlProfile {
    /// P&L at `spot`, linearly interpolated and held flat beyond the ladder.
    ///
    /// `None` for an empty ladder.
    pub fn pnl_at(&self, spot: f64) -> Option<f64> {
        let spots = &self.curve.spots;
        let (first, last) = (*spots.first()?, *spots.last()?);
        if spot <= first {
            return self.pnl.first().copied();
        }
        if spot >= last {
            return self.pnl.last().copied();
        }
        let i = spots.iter().position(|&s| s >= spot)?;
        let (x0, x1) = (spots[i - 1], spots[i]);
        let (y0, y1) = (self.pnl[i - 1], self.pnl[i]);
        Some(y0 + (spot - x0) / (x1 - x0) * (y1 - y0))
    }

    /// True when `max_profit` is unbounded.
    #[inline]
    pub fn unlimited_upside(&self) -> bool {
        self.max_profit.is_none()
    }
}

/// P&L at expiry of `legs` bought for `premium`, over `spots`.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{LegParams, LegRequest};
/// use pricer_risk::payoff::{pnl_profile, spot_ladder};
///
/// let call = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
/// let legs = vec![LegRequest::new("c", "vanilla", "black_scholes", 1.0, call)];
/// let spots = spot_ladder(50.0, 150.0, 101).unwrap();
///
/// let profile = pnl_profile(&legs, 5.0, &spots);
/// assert_eq!(profile.breakevens.len(), 1);
/// assert!((profile.breakevens[0] - 105.0).abs() < 1e-9);
/// assert_eq!(profile.max_loss, 5.0);
/// assert!(profile.unlimited_upside());
/// ```
pub fn pnl_profile(legs: &[LegRequest], premium: f64, spots: &[f64]) -> PnlProfile {
    let curve = payoff_curve(legs, spots);
    let pnl: Vec<f64> = curve.payoffs.iter().map(|p| p - premium).collect();

    let (max_pnl, min_pnl) = if pnl.is_empty() {
        (0.0, 0.0)
    } else {
        pnl.iter()
            .fold((f64::NEG_INFINITY, f64::INFINITY), |(hi, lo), &x| (hi.max(x), lo.min(x)))
    };
    let breakevens = breakevens(&curve.spots, &pnl);
    let max_profit = if terminal_slope_high(legs) > UNLIMITED_SLOPE_TOL {
        None
    } else {
        Some(max_pnl)
    };
    let max_loss = if min_pnl < 0.0 { -min_pnl } else { 0.0 };

    PnlProfile {
        curve,
        premium,
        pnl,
        max_pnl,
        min_pnl,
        breakevens,
        max_profit,
        max_loss,
    }
}

fn breakevens(spots: &[f64], pnl: &[f64]) -> Vec<f64> {
    let mut found: Vec<f64> = Vec::new();
    for i in 1..pnl.len() {
        let (a, b) = (pnl[i - 1], pnl[i]);
        let crosses = a == 0.0 || b == 0.0 || (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0);
        if !crosses {
            continue;
        }
        let be = if a == 0.0 {
            spots[i - 1]
        } else if b == 0.0 {
            spots[i]
        } else {
            spots[i - 1] + (-a / (b - a)) * (spots[i] - spots[i - 1])
        };
        if found.last().map_or(true, |&prev| (prev - be).abs() > BREAKEVEN_DEDUP_TOL) {
            found.push(be);
        }
    }
    found
}

/// Approximate slope of the terminal payoff as spot → ∞.
///
/// Forwards contribute their quantity. Every other instrument type
/// contributes its quantity when its `option_type` is (or defaults to) call,
/// so digitals, barriers and Asians count as if they were vanilla calls.
/// Legs with an unknown instrument type contribute nothing.
pub fn terminal_slope_high(legs: &[LegRequest]) -> f64 {
    legs.iter()
        .filter_map(|req| {
            let instrument_type = req.instrument_type.parse::<InstrumentType>().ok()?;
            if instrument_type == InstrumentType::Forward {
                return Some(req.quantity);
            }
            let option_type = req.params.key_or("option_type", "call").ok()?;
            (option_type == "call").then_some(req.quantity)
        })
        .sum()
}
