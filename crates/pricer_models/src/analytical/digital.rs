//! Cash-or-nothing digital options under Black-Scholes.
//!
//! Price = payout · e^(-rT) · N(±d₂)

use pricer_core::math::norm_cdf;
use pricer_core::types::{MarketState, OptionType};

use super::error::AnalyticalError;

/// Prices a cash-or-nothing digital paying `payout` if the option finishes
/// in the money.
///
/// At `time_to_expiry <= 0` the payout is returned iff the option is
/// strictly in the money (a call at `S == K` pays nothing).
///
/// # Errors
/// - `InvalidPayout` if payout <= 0
/// - `InvalidStrike` if strike <= 0
/// - `InvalidVolatility` if vol <= 0 before expiry
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketState, OptionType};
/// use pricer_models::analytical::digital_cash_or_nothing_price;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let call = digital_cash_or_nothing_price(OptionType::Call, &market, 100.0, 1.0, 1.0).unwrap();
/// let put = digital_cash_or_nothing_price(OptionType::Put, &market, 100.0, 1.0, 1.0).unwrap();
/// assert!((call + put - (-0.05_f64).exp()).abs() < 1e-12);
/// ```
pub fn digital_cash_or_nothing_price(
    option_type: OptionType,
    market: &MarketState,
    strike: f64,
    time_to_expiry: f64,
    payout: f64,
) -> Result<f64, AnalyticalError> {
    if !payout.is_finite() || payout <= 0.0 {
        return Err(AnalyticalError::InvalidPayout { payout });
    }
    AnalyticalError::check_strike(strike)?;

    let spot = market.spot();
    if time_to_expiry <= 0.0 {
        let in_the_money = match option_type {
            OptionType::Call => spot > strike,
            OptionType::Put => spot < strike,
        };
        return Ok(if in_the_money { payout } else { 0.0 });
    }

    let vol = market.vol();
    AnalyticalError::check_volatility(vol)?;

    let t = time_to_expiry;
    let d2 = ((spot / strike).ln() + (market.rate() - market.dividend_yield() - 0.5 * vol * vol) * t)
        / (vol * t.sqrt());
    let disc = (-market.rate() * t).exp();

    let prob = match option_type {
        OptionType::Call => norm_cdf(d2),
        OptionType::Put => norm_cdf(-d2),
    };
    Ok(payout * disc * prob)
}
