//! Black-Scholes pricing model for European options with a continuous
//! dividend yield.
//!
//! ## Mathematical Formulas
//!
//! **Call Price**: C = S·e^(-qT)·N(d₁) - K·e^(-rT)·N(d₂)
//! **Put Price**: P = K·e^(-rT)·N(-d₂) - S·e^(-qT)·N(-d₁)
//!
//! Where:
//! - d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T)
//! - d₂ = d₁ - σ√T
//!
//! Greeks are per 1.0 of spot, per 1.0 absolute volatility, per 1.0
//! absolute rate, and theta is per year.

use num_traits::Float;
use pricer_core::math::{norm_cdf, norm_pdf};
use pricer_core::types::{Greeks, MarketState, OptionType};

use super::error::AnalyticalError;

/// Black-Scholes model for European option pricing.
///
/// # Type Parameters
/// * `T` - Floating-point type implementing `Float` (e.g., `f32`, `f64`)
///
/// # Examples
/// ```
/// use pricer_models::analytical::BlackScholes;
/// use pricer_core::types::OptionType;
///
/// let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
/// let call = bs.price(OptionType::Call, 100.0, 1.0);
/// let put = bs.price(OptionType::Put, 100.0, 1.0);
///
/// // Put-call parity: C - P = S - K*exp(-rT)
/// let parity = call - put - (100.0 - 100.0 * (-0.05_f64).exp());
/// assert!(parity.abs() < 1e-10);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BlackScholes<T: Float> {
    /// Spot price (S)
    spot: T,
    /// Risk-free interest rate (r)
    rate: T,
    /// Continuous dividend yield (q)
    dividend_yield: T,
    /// Volatility (σ)
    volatility: T,
}

impl<T: Float> BlackScholes<T> {
    /// Creates a new Black-Scholes model.
    ///
    /// # Errors
    /// - `AnalyticalError::InvalidSpot` if spot <= 0
    /// - `AnalyticalError::InvalidVolatility` if volatility <= 0
    pub fn new(spot: T, rate: T, dividend_yield: T, volatility: T) -> Result<Self, AnalyticalError> {
        let zero = T::zero();

        if !spot.is_finite() || spot <= zero {
            return Err(AnalyticalError::InvalidSpot {
                spot: spot.to_f64().unwrap_or(f64::NAN),
            });
        }

        if !volatility.is_finite() || volatility <= zero {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: volatility.to_f64().unwrap_or(f64::NAN),
            });
        }

        Ok(Self {
            spot,
            rate,
            dividend_yield,
            volatility,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> T {
        self.spot
    }

    /// Returns the risk-free rate.
    #[inline]
    pub fn rate(&self) -> T {
        self.rate
    }

    /// Returns the dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> T {
        self.dividend_yield
    }

    /// Returns the volatility.
    #[inline]
    pub fn volatility(&self) -> T {
        self.volatility
    }

    /// Computes d₁ = (ln(S/K) + (r - q + σ²/2)T) / (σ√T).
    ///
    /// `expiry` must be strictly positive.
    #[inline]
    pub fn d1(&self, strike: T, expiry: T) -> T {
        let half = T::from(0.5).unwrap();
        let vol_sqrt_t = self.volatility * expiry.sqrt();
        let log_moneyness = (self.spot / strike).ln();
        let drift = (self.rate - self.dividend_yield + half * self.volatility * self.volatility) * expiry;
        (log_moneyness + drift) / vol_sqrt_t
    }

    /// Computes d₂ = d₁ - σ√T.
    #[inline]
    pub fn d2(&self, strike: T, expiry: T) -> T {
        self.d1(strike, expiry) - self.volatility * expiry.sqrt()
    }

    /// Computes the European option price.
    ///
    /// For `expiry <= 0` the intrinsic value is returned.
    pub fn price(&self, option_type: OptionType, strike: T, expiry: T) -> T {
        let zero = T::zero();
        if expiry <= zero {
            return match option_type {
                OptionType::Call => (self.spot - strike).max(zero),
                OptionType::Put => (strike - self.spot).max(zero),
            };
        }

        let d1 = self.d1(strike, expiry);
        let d2 = d1 - self.volatility * expiry.sqrt();
        let disc_r = (-self.rate * expiry).exp();
        let disc_q = (-self.dividend_yield * expiry).exp();

        match option_type {
            OptionType::Call => self.spot * disc_q * norm_cdf(d1) - strike * disc_r * norm_cdf(d2),
            OptionType::Put => strike * disc_r * norm_cdf(-d2) - self.spot * disc_q * norm_cdf(-d1),
        }
    }
}

impl BlackScholes<f64> {
    /// Builds the model from a market snapshot, validating volatility.
    pub fn from_market(market: &MarketState) -> Result<Self, AnalyticalError> {
        Self::new(market.spot(), market.rate(), market.dividend_yield(), market.vol())
    }

    /// Computes analytical Greeks for `expiry > 0`.
    ///
    /// - Δ = e^(-qT)·N(d₁) for calls, e^(-qT)·(N(d₁) - 1) for puts
    /// - Γ = e^(-qT)·φ(d₁) / (S·σ·√T)
    /// - ν = S·e^(-qT)·φ(d₁)·√T
    /// - Θ and ρ as in the standard dividend-adjusted formulas
    pub fn greeks(&self, option_type: OptionType, strike: f64, expiry: f64) -> Greeks {
        let s = self.spot;
        let r = self.rate;
        let q = self.dividend_yield;
        let vol = self.volatility;

        let sqrt_t = expiry.sqrt();
        let d1 = self.d1(strike, expiry);
        let d2 = d1 - vol * sqrt_t;
        let disc_r = (-r * expiry).exp();
        let disc_q = (-q * expiry).exp();
        let pdf_d1 = norm_pdf(d1);

        let gamma = disc_q * pdf_d1 / (s * vol * sqrt_t);
        let vega = s * disc_q * pdf_d1 * sqrt_t;
        let decay = -(s * disc_q * pdf_d1 * vol) / (2.0 * sqrt_t);

        match option_type {
            OptionType::Call => {
                let nd1 = norm_cdf(d1);
                let nd2 = norm_cdf(d2);
                Greeks {
                    delta: disc_q * nd1,
                    gamma,
                    vega,
                    theta: decay - r * strike * disc_r * nd2 + q * s * disc_q * nd1,
                    rho: strike * expiry * disc_r * nd2,
                }
            }
            OptionType::Put => {
                let nmd1 = norm_cdf(-d1);
                let nmd2 = norm_cdf(-d2);
                Greeks {
                    delta: disc_q * (norm_cdf(d1) - 1.0),
                    gamma,
                    vega,
                    theta: decay + r * strike * disc_r * nmd2 - q * s * disc_q * nmd1,
                    rho: -strike * expiry * disc_r * nmd2,
                }
            }
        }
    }
}

/// Vanilla Black-Scholes price and Greeks from a market snapshot.
///
/// At `time_to_expiry <= 0` returns the intrinsic value, zero Greeks and a
/// sign-determined delta: +1 for an in-the-money call, -1 for an
/// in-the-money put, 0 otherwise. Volatility is not validated there.
///
/// # Errors
/// - `InvalidStrike` if strike <= 0
/// - `InvalidVolatility` if vol <= 0 before expiry
///
/// # Examples
/// ```
/// use pricer_core::types::{MarketState, OptionType};
/// use pricer_models::analytical::black_scholes_price_and_greeks;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let (price, greeks) =
///     black_scholes_price_and_greeks(OptionType::Call, &market, 100.0, 1.0).unwrap();
/// assert!((price - 10.4506).abs() < 1e-3);
/// assert!(greeks.delta > 0.5 && greeks.delta < 0.7);
/// ```
pub fn black_scholes_price_and_greeks(
    option_type: OptionType,
    market: &MarketState,
    strike: f64,
    time_to_expiry: f64,
) -> Result<(f64, Greeks), AnalyticalError> {
    AnalyticalError::check_strike(strike)?;

    if time_to_expiry <= 0.0 {
        let spot = market.spot();
        let intrinsic = option_type.intrinsic(spot, strike);
        let delta = match option_type {
            OptionType::Call if spot > strike => 1.0,
            OptionType::Put if spot < strike => -1.0,
            _ => 0.0,
        };
        return Ok((intrinsic, Greeks::new(delta, 0.0, 0.0, 0.0, 0.0)));
    }

    let bs = BlackScholes::from_market(market)?;
    Ok((
        bs.price(option_type, strike, time_to_expiry),
        bs.greeks(option_type, strike, time_to_expiry),
    ))
}

/// Call spread: long one call at `strike_long`, short one call at
/// `strike_short`. Price and Greeks are the difference of the two calls.
///
/// # Errors
/// - `StrikeOrdering` unless `strike_short > strike_long`
/// - any error of [`black_scholes_price_and_greeks`]
pub fn call_spread_price_and_greeks(
    market: &MarketState,
    strike_long: f64,
    strike_short: f64,
    time_to_expiry: f64,
) -> Result<(f64, Greeks), AnalyticalError> {
    AnalyticalError::check_strike(strike_long)?;
    AnalyticalError::check_strike(strike_short)?;
    if strike_short <= strike_long {
        return Err(AnalyticalError::StrikeOrdering {
            strike_long,
            strike_short,
        });
    }

    let (long_price, long_greeks) =
        black_scholes_price_and_greeks(OptionType::Call, market, strike_long, time_to_expiry)?;
    let (short_price, short_greeks) =
        black_scholes_price_and_greeks(OptionType::Call, market, strike_short, time_to_expiry)?;

    Ok((long_price - short_price, long_greeks - short_greeks))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market(spot: f64, rate: f64, q: f64, vol: f64) -> MarketState {
        MarketState::new(spot, rate, q, vol).unwrap()
    }

    // ==========================================================
    // Construction
    // ==========================================================

    #[test]
    fn test_new_rejects_invalid_inputs() {
        assert!(BlackScholes::new(-100.0_f64, 0.05, 0.0, 0.2).is_err());
        assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, 0.0).is_err());
        assert!(BlackScholes::new(100.0_f64, 0.05, 0.0, f64::NAN).is_err());
        assert!(BlackScholes::new(100.0_f32, 0.05, 0.0, 0.2).is_ok());
    }

    // ==========================================================
    // Prices
    // ==========================================================

    #[test]
    fn test_reference_prices() {
        let bs = BlackScholes::new(100.0_f64, 0.05, 0.0, 0.2).unwrap();
        assert_relative_eq!(bs.price(OptionType::Call, 100.0, 1.0), 10.4506, epsilon = 1e-3);
        assert_relative_eq!(bs.price(OptionType::Put, 100.0, 1.0), 5.5735, epsilon = 1e-3);
    }

    #[test]
    fn test_put_call_parity_with_dividends() {
        let (s, k, r, q, t) = (105.0, 95.0, 0.03, 0.02, 0.75);
        let bs = BlackScholes::new(s, r, q, 0.3).unwrap();
        let call = bs.price(OptionType::Call, k, t);
        let put = bs.price(OptionType::Put, k, t);
        let forward = s * (-q * t).exp() - k * (-r * t).exp();
        assert_relative_eq!(call - put, forward, epsilon = 1e-10);
    }

    #[test]
    fn test_price_at_expiry_is_intrinsic() {
        let bs = BlackScholes::new(110.0_f64, 0.05, 0.0, 0.2).unwrap();
        assert_eq!(bs.price(OptionType::Call, 100.0, 0.0), 10.0);
        assert_eq!(bs.price(OptionType::Put, 100.0, -1.0), 0.0);
    }

    // ==========================================================
    // Greeks
    // ==========================================================

    #[test]
    fn test_greeks_reference_values() {
        let m = market(100.0, 0.05, 0.0, 0.2);
        let (_, g) = black_scholes_price_and_greeks(OptionType::Call, &m, 100.0, 1.0).unwrap();
        assert_relative_eq!(g.delta, 0.6368, epsilon = 1e-3);
        assert_relative_eq!(g.gamma, 0.01876, epsilon = 1e-4);
        assert_relative_eq!(g.vega, 37.524, epsilon = 1e-2);
        assert_relative_eq!(g.theta, -6.414, epsilon = 1e-2);
        assert_relative_eq!(g.rho, 53.232, epsilon = 1e-2);
    }

    #[test]
    fn test_call_put_delta_relation() {
        let m = market(100.0, 0.05, 0.03, 0.25);
        let (_, call) = black_scholes_price_and_greeks(OptionType::Call, &m, 90.0, 0.5).unwrap();
        let (_, put) = black_scholes_price_and_greeks(OptionType::Put, &m, 90.0, 0.5).unwrap();
        assert_relative_eq!(call.delta - put.delta, (-0.03_f64 * 0.5).exp(), epsilon = 1e-10);
        assert_relative_eq!(call.gamma, put.gamma, epsilon = 1e-14);
        assert_relative_eq!(call.vega, put.vega, epsilon = 1e-12);
    }

    #[test]
    fn test_at_expiry_delta_is_sign_determined() {
        let itm_call = market(110.0, 0.05, 0.0, 0.2);
        let (p, g) = black_scholes_price_and_greeks(OptionType::Call, &itm_call, 100.0, 0.0).unwrap();
        assert_eq!(p, 10.0);
        assert_eq!(g, Greeks::new(1.0, 0.0, 0.0, 0.0, 0.0));

        let itm_put = market(90.0, 0.05, 0.0, 0.2);
        let (p, g) = black_scholes_price_and_greeks(OptionType::Put, &itm_put, 100.0, -0.5).unwrap();
        assert_eq!(p, 10.0);
        assert_eq!(g.delta, -1.0);

        let atm = market(100.0, 0.05, 0.0, 0.2);
        let (p, g) = black_scholes_price_and_greeks(OptionType::Call, &atm, 100.0, 0.0).unwrap();
        assert_eq!(p, 0.0);
        assert_eq!(g.delta, 0.0);
    }

    #[test]
    fn test_zero_vol_allowed_only_at_expiry() {
        let m = market(100.0, 0.05, 0.0, 0.0);
        assert!(black_scholes_price_and_greeks(OptionType::Call, &m, 100.0, 0.0).is_ok());
        assert!(matches!(
            black_scholes_price_and_greeks(OptionType::Call, &m, 100.0, 1.0),
            Err(AnalyticalError::InvalidVolatility { .. })
        ));
    }

    #[test]
    fn test_non_positive_strike_rejected() {
        let m = market(100.0, 0.05, 0.0, 0.2);
        assert!(matches!(
            black_scholes_price_and_greeks(OptionType::Call, &m, 0.0, 1.0),
            Err(AnalyticalError::InvalidStrike { .. })
        ));
    }

    // ==========================================================
    // Call spread
    // ==========================================================

    #[test]
    fn test_call_spread_is_difference_of_calls() {
        let m = market(100.0, 0.05, 0.01, 0.2);
        let (spread, g) = call_spread_price_and_greeks(&m, 95.0, 110.0, 1.0).unwrap();
        let (c1, g1) = black_scholes_price_and_greeks(OptionType::Call, &m, 95.0, 1.0).unwrap();
        let (c2, g2) = black_scholes_price_and_greeks(OptionType::Call, &m, 110.0, 1.0).unwrap();
        assert_relative_eq!(spread, c1 - c2, epsilon = 1e-12);
        assert_relative_eq!(g.delta, g1.delta - g2.delta, epsilon = 1e-12);
        assert!(spread > 0.0 && spread < 15.0);
    }

    #[test]
    fn test_call_spread_strike_ordering() {
        let m = market(100.0, 0.05, 0.0, 0.2);
        assert!(matches!(
            call_spread_price_and_greeks(&m, 110.0, 110.0, 1.0),
            Err(AnalyticalError::StrikeOrdering { .. })
        ));
        assert!(call_spread_price_and_greeks(&m, 110.0, 100.0, 1.0).is_err());
    }

    // ==========================================================
    // Property-based Tests
    // ==========================================================

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(500))]

            #[test]
            fn test_put_call_parity(
                spot in 1.0_f64..500.0,
                strike in 1.0_f64..500.0,
                rate in -0.02_f64..0.15,
                q in 0.0_f64..0.1,
                vol in 0.01_f64..1.5,
                t in 0.01_f64..5.0,
            ) {
                let bs = BlackScholes::new(spot, rate, q, vol).unwrap();
                let call = bs.price(OptionType::Call, strike, t);
                let put = bs.price(OptionType::Put, strike, t);
                let forward = spot * (-q * t).exp() - strike * (-rate * t).exp();
                prop_assert!((call - put - forward).abs() <= 1e-9 * spot.max(strike));
            }

            #[test]
            fn test_price_bounds(
                spot in 1.0_f64..500.0,
                strike in 1.0_f64..500.0,
                vol in 0.01_f64..1.5,
                t in 0.01_f64..5.0,
            ) {
                let bs = BlackScholes::new(spot, 0.03, 0.0, vol).unwrap();
                let call = bs.price(OptionType::Call, strike, t);
                let put = bs.price(OptionType::Put, strike, t);
                prop_assert!(call <= spot + 1e-9);
                prop_assert!(put <= strike * (-0.03 * t).exp() + 1e-9);
            }
        }
    }
}
