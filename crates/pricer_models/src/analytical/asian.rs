//! Continuous geometric-average Asian options (fixed strike).
//!
//! Under GBM the continuous geometric average G is lognormal with
//!
//! - m = ln S + (r - q - σ²/2)·T/2
//! - v = σ²·T/3
//!
//! so E[G] = e^(m + v/2) and the price is the discounted lognormal call/put
//! expectation with d₁ = (m - ln K + v)/√v, d₂ = d₁ - √v.

use pricer_core::math::norm_cdf;
use pricer_core::types::{MarketState, OptionType};

use super::error::AnalyticalError;

/// Prices a continuous geometric-average price Asian option.
///
/// Returns intrinsic value at `time_to_expiry <= 0`.
///
/// # Errors
/// - `InvalidStrike` if strike <= 0
/// - `InvalidVolatility` if vol <= 0 before expiry
pub fn asian_geometric_continuous_price(
    option_type: OptionType,
    market: &MarketState,
    strike: f64,
    time_to_expiry: f64,
) -> Result<f64, AnalyticalError> {
    AnalyticalError::check_strike(strike)?;

    let spot = market.spot();
    if time_to_expiry <= 0.0 {
        return Ok(option_type.intrinsic(spot, strike));
    }

    let vol = market.vol();
    AnalyticalError::check_volatility(vol)?;

    let t = time_to_expiry;
    let m = spot.ln() + (market.rate() - market.dividend_yield() - 0.5 * vol * vol) * (t / 2.0);
    let v = vol * vol * (t / 3.0);
    let s = v.sqrt();

    let disc = (-market.rate() * t).exp();
    let expected_average = (m + 0.5 * v).exp();

    let d1 = (m - strike.ln() + v) / s;
    let d2 = d1 - s;

    Ok(match option_type {
        OptionType::Call => disc * (expected_average * norm_cdf(d1) - strike * norm_cdf(d2)),
        OptionType::Put => disc * (strike * norm_cdf(-d2) - expected_average * norm_cdf(-d1)),
    })
}
