//! Discounted forward contract value.

use pricer_core::types::MarketState;

use super::error::AnalyticalError;

/// PV of a forward delivering the underlying at expiry against `strike`.
///
/// PV = S·e^(-qT) - K·e^(-rT), and S - K at `time_to_expiry <= 0`.
/// Volatility plays no part.
///
/// # Examples
/// ```
/// use pricer_core::types::MarketState;
/// use pricer_models::analytical::forward_value;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let pv = forward_value(&market, 100.0, 1.0).unwrap();
/// assert!((pv - 100.0 * (1.0 - (-0.05_f64).exp())).abs() < 1e-12);
/// ```
pub fn forward_value(market: &MarketState, strike: f64, time_to_expiry: f64) -> Result<f64, AnalyticalError> {
    AnalyticalError::check_strike(strike)?;

    let spot = market.spot();
    if time_to_expiry <= 0.0 {
        return Ok(spot - strike);
    }

    let disc_r = (-market.rate() * time_to_expiry).exp();
    let disc_q = (-market.dividend_yield() * time_to_expiry).exp();
    Ok(spot * disc_q - strike * disc_r)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_forward_with_dividends() {
        let m = MarketState::new(100.0, 0.05, 0.02, 0.0).unwrap();
        let pv = forward_value(&m, 103.0, 1.0).unwrap();
        assert_relative_eq!(pv, 100.0 * (-0.02_f64).exp() - 103.0 * (-0.05_f64).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_forward_at_expiry() {
        let m = MarketState::new(90.0, 0.05, 0.0, 0.2).unwrap();
        assert_eq!(forward_value(&m, 100.0, 0.0).unwrap(), -10.0);
        assert_eq!(forward_value(&m, 100.0, -1.0).unwrap(), -10.0);
    }

    #[test]
    fn test_forward_rejects_bad_strike() {
        let m = MarketState::new(90.0, 0.05, 0.0, 0.2).unwrap();
        assert!(forward_value(&m, 0.0, 1.0).is_err());
    }
}
