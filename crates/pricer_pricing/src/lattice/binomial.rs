//! Cox–Ross–Rubinstein binomial tree.
//!
//! `u = e^(σ√dt)`, `d = 1/u` and the risk-neutral up probability
//! `p = (e^((r−q)dt) − d)/(u − d)`, clamped to [0, 1] when extreme inputs
//! push it outside. Backward induction runs over a single value buffer of
//! `steps + 1` nodes, so memory is linear in `steps` and time quadratic.

use pricer_core::types::{MarketState, OptionType, PricingError};

use crate::mc::{ConfigError, MAX_STEPS};

/// Per-step tree constants.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CrrParameters {
    /// Up factor
    pub up: f64,
    /// Down factor (1/up)
    pub down: f64,
    /// Risk-neutral up probability, in [0, 1]
    pub probability: f64,
    /// One-step discount factor e^(−r·dt)
    pub discount: f64,
}

/// Tree constants for `steps` steps over `time_to_expiry` years.
pub fn crr_parameters(market: &MarketState, time_to_expiry: f64, steps: usize) -> CrrParameters {
    let dt = time_to_expiry / steps as f64;
    let up = (market.vol() * dt.sqrt()).exp();
    let down = 1.0 / up;
    let growth = ((market.rate() - market.dividend_yield()) * dt).exp();
    let probability = ((growth - down) / (up - down)).clamp(0.0, 1.0);
    CrrParameters {
        up,
        down,
        probability,
        discount: (-market.rate() * dt).exp(),
    }
}

/// Prices a European (`american = false`) or American option on a CRR tree.
///
/// # Errors
/// - `Configuration` if `steps` is 0 or above the step limit
/// - `Domain` if strike ≤ 0, or vol ≤ 0 before expiry
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketState, OptionType};
/// use pricer_pricing::lattice::price_binomial;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let european = price_binomial(OptionType::Put, &market, 100.0, 1.0, 200, false).unwrap();
/// let american = price_binomial(OptionType::Put, &market, 100.0, 1.0, 200, true).unwrap();
/// assert!(american > european);
/// assert!((european - 5.5735).abs() < 0.02);
/// ```
pub fn price_binomial(
    option_type: OptionType,
    market: &MarketState,
    strike: f64,
    time_to_expiry: f64,
    steps: usize,
    american: bool,
) -> Result<f64, PricingError> {
    if steps == 0 || steps > MAX_STEPS {
        return Err(ConfigError::InvalidStepCount(steps).into());
    }
    if !(strike.is_finite() && strike > 0.0) {
        return Err(PricingError::domain("spot and strike must be > 0"));
    }
    let spot = market.spot();
    if time_to_expiry <= 0.0 {
        return Ok(option_type.intrinsic(spot, strike));
    }
    market.require_vol()?;

    let CrrParameters {
        up,
        down,
        probability: p,
        discount,
    } = crr_parameters(market, time_to_expiry, steps);
    let node_spot = |i: usize, j: usize| spot * up.powi(j as i32) * down.powi((i - j) as i32);

    let mut values: Vec<f64> = (0..=steps)
        .map(|j| option_type.intrinsic(node_spot(steps, j), strike))
        .collect();

    for i in (0..steps).rev() {
        for j in 0..=i {
            let continuation = discount * (p * values[j + 1] + (1.0 - p) * values[j]);
            values[j] = if american {
                continuation.max(option_type.intrinsic(node_spot(i, j), strike))
            } else {
                continuation
            };
        }
    }

    Ok(values[0])
}
