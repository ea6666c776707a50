//! Terminal payoff curves over a spot ladder.

use pricer_models::instruments::{InstrumentLeg, InstrumentType, LegRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::portfolio::PortfolioError;

/// Minimum number of spot ladder points.
pub const MIN_LADDER_STEPS: usize = 3;
/// Maximum number of spot ladder points.
pub const MAX_LADDER_STEPS: usize = 401;

/// Exclusion reason for barrier and Asian legs.
pub const PATH_DEPENDENT: &str = "path-dependent payoff";

/// A leg left out of a payoff curve.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExcludedLeg {
    /// Leg identifier
    pub leg_id: String,
    /// Why it was left out
    pub reason: String,
}

/// Quantity-weighted terminal payoff of the path-independent legs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffCurve {
    /// Terminal spots
    pub spots: Vec<f64>,
    /// Portfolio payoff at each spot
    pub payoffs: Vec<f64>,
    /// Legs that contribute, in request order
    pub included_leg_ids: Vec<String>,
    /// Legs left out, in request order
    pub excluded: Vec<ExcludedLeg>,
}

/// Evenly spaced spots from `spot_min` to `spot_max` inclusive.
///
/// # Errors
/// `PortfolioError::InvalidLadder` unless `0 < spot_min < spot_max` (both
/// finite) and `3 ≤ steps ≤ 401`.
///
/// # Examples
///
/// ```rust
/// use pricer_risk::payoff::spot_ladder;
///
/// let spots = spot_ladder(80.0, 120.0, 5).unwrap();
/// assert_eq!(spots, vec![80.0, 90.0, 100.0, 110.0, 120.0]);
/// assert!(spot_ladder(0.0, 120.0, 5).is_err());
/// ```
pub fn spot_ladder(spot_min: f64, spot_max: f64, steps: usize) -> Result<Vec<f64>, PortfolioError> {
    if !(spot_min.is_finite() && spot_max.is_finite() && spot_min > 0.0 && spot_min < spot_max) {
        return Err(PortfolioError::InvalidLadder(format!(
            "need 0 < spot_min < spot_max (got {}, {})",
            spot_min, spot_max
        )));
    }
    if !(MIN_LADDER_STEPS..=MAX_LADDER_STEPS).contains(&steps) {
        return Err(PortfolioError::InvalidLadder(format!(
            "steps must be in [{}, {}] (got {})",
            MIN_LADDER_STEPS, MAX_LADDER_STEPS, steps
        )));
    }
    let width = spot_max - spot_min;
    let last = steps - 1;
    Ok((0..steps)
        .map(|i| {
            if i == last {
                spot_max
            } else {
                spot_min + width * i as f64 / last as f64
            }
        })
        .collect())
}

/// Terminal payoff curve of `legs` at each of `spots`.
///
/// Vanilla and American legs pay intrinsic, digitals pay `payout` strictly
/// in the money, forwards pay `S − K`. Barrier and Asian legs are excluded
/// as path-dependent; legs that fail validation are excluded with the
/// validation message.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{LegParams, LegRequest};
/// use pricer_risk::payoff::payoff_curve;
///
/// let call = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
/// let legs = vec![
///     LegRequest::new("c", "vanilla", "black_scholes", 2.0, call.clone()),
///     LegRequest::new("b", "barrier", "mc_bridge", 1.0, call.with("barrier_level", 130.0)),
/// ];
/// let curve = payoff_curve(&legs, &[90.0, 110.0]);
/// assert_eq!(curve.payoffs, vec![0.0, 20.0]);
/// assert_eq!(curve.included_leg_ids, vec!["c".to_string()]);
/// assert_eq!(curve.excluded[0].reason, "path-dependent payoff");
/// ```
pub fn payoff_curve(legs: &[LegRequest], spots: &[f64]) -> PayoffCurve {
    let mut included: Vec<InstrumentLeg> = Vec::with_capacity(legs.len());
    let mut excluded = Vec::new();

    for req in legs {
        let path_dependent = req
            .instrument_type
            .parse::<InstrumentType>()
            .map(|t| t.is_path_dependent())
            .unwrap_or(false);
        if path_dependent {
            excluded.push(ExcludedLeg {
                leg_id: req.leg_id.clone(),
                reason: PATH_DEPENDENT.to_string(),
            });
            continue;
        }
        match req.parse() {
            Ok(leg) => included.push(leg),
            Err(err) => {
                debug!(leg_id = %req.leg_id, error = %err, "payoff curve excluding leg");
                excluded.push(ExcludedLeg {
                    leg_id: req.leg_id.clone(),
                    reason: format!("invalid leg params: {}", err),
                });
            }
        }
    }

    let payoffs = spots
        .iter()
        .map(|&spot| {
            included
                .iter()
                .filter_map(|leg| leg.product().terminal_payoff(spot).map(|p| p * leg.quantity()))
                .sum()
        })
        .collect();

    PayoffCurve {
        spots: spots.to_vec(),
        payoffs,
        included_leg_ids: included.iter().map(|leg| leg.leg_id().to_string()).collect(),
        excluded,
    }
}
