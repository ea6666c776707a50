//! Arithmetic-average (discrete, fixed-strike) Asian options by Monte Carlo.
//!
//! The average is taken over `fixings` equally spaced observation dates in
//! (0, T]; the spot at t = 0 is not part of it.

use pricer_core::types::{MarketState, PricingError};
use pricer_models::instruments::OptionContract;

use super::config::{McConfig, Prepared};
use super::error::ConfigError;
use super::paths::{fill_spot_path, GbmParams};
use crate::rng::{DrawKey, DrawMatrix, PricerRng, RandomDrawCache};

fn prepare(
    option: &OptionContract,
    market: &MarketState,
    fixings: usize,
    paths: usize,
    seed: u64,
) -> Result<Prepared, PricingError> {
    if !(option.strike.is_finite() && option.strike > 0.0) {
        return Err(PricingError::domain("spot and strike must be > 0"));
    }
    if option.time_to_expiry <= 0.0 {
        return Ok(Prepared::Settled(option.intrinsic(market.spot())));
    }
    market.require_vol()?;
    if fixings < 1 {
        return Err(ConfigError::InvalidParameter {
            name: "fixings",
            value: "must be >= 1".to_string(),
        }
        .into());
    }
    if paths < 1 {
        return Err(ConfigError::InvalidParameter {
            name: "paths",
            value: "must be >= 1".to_string(),
        }
        .into());
    }
    Ok(Prepared::Simulate(McConfig::new(paths, fixings, seed)?))
}

/// Prices an arithmetic-average Asian option with normals drawn from `seed`.
///
/// # Errors
/// - `Domain` if strike ≤ 0 or vol ≤ 0 (before expiry)
/// - `Configuration` if `fixings` or `paths` is out of range
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{MarketState, OptionType};
/// use pricer_models::instruments::OptionContract;
/// use pricer_pricing::mc::price_mc_asian_arithmetic;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let option = OptionContract::new(OptionType::Call, 100.0, 1.0).unwrap();
/// let price = price_mc_asian_arithmetic(&option, &market, 12, 5_000, 11).unwrap();
/// assert!(price > 4.0 && price < 7.5);
/// ```
pub fn price_mc_asian_arithmetic(
    option: &OptionContract,
    market: &MarketState,
    fixings: usize,
    paths: usize,
    seed: u64,
) -> Result<f64, PricingError> {
    let config = match prepare(option, market, fixings, paths, seed)? {
        Prepared::Settled(value) => return Ok(value),
        Prepared::Simulate(config) => config,
    };
    let z = PricerRng::from_seed(config.seed()).normal_matrix(config.paths(), config.steps());
    simulate(option, market, config, &z)
}

/// Prices on caller-supplied normals (`paths × fixings`).
pub fn price_mc_asian_arithmetic_with_draws(
    option: &OptionContract,
    market: &MarketState,
    fixings: usize,
    paths: usize,
    z: &DrawMatrix,
) -> Result<f64, PricingError> {
    let config = match prepare(option, market, fixings, paths, 0)? {
        Prepared::Settled(value) => return Ok(value),
        Prepared::Simulate(config) => config,
    };
    simulate(option, market, config, z)
}

/// Prices through a draw cache, drawing from `seed` on first use.
pub fn price_mc_asian_arithmetic_cached(
    option: &OptionContract,
    market: &MarketState,
    fixings: usize,
    paths: usize,
    seed: u64,
    cache: &mut RandomDrawCache,
) -> Result<f64, PricingError> {
    let config = match prepare(option, market, fixings, paths, seed)? {
        Prepared::Settled(value) => return Ok(value),
        Prepared::Simulate(config) => config,
    };
    if !cache.contains(DrawKey::Normal) {
        let z = PricerRng::from_seed(config.seed()).normal_matrix(config.paths(), config.steps());
        cache.insert(DrawKey::Normal, z);
    }
    let z = cache
        .get(DrawKey::Normal)
        .ok_or(ConfigError::MissingDraws { name: "z" })?;
    simulate(option, market, config, z)
}

fn simulate(
    option: &OptionContract,
    market: &MarketState,
    config: McConfig,
    z: &DrawMatrix,
) -> Result<f64, PricingError> {
    let (paths, fixings) = (config.paths(), config.steps());
    z.ensure_shape("z", paths, fixings)?;

    let gbm = GbmParams::new(
        market.spot(),
        market.rate(),
        market.dividend_yield(),
        market.vol(),
        option.time_to_expiry,
    );
    let step = gbm.step(fixings);
    let mut spots = vec![0.0; fixings];

    let mut payoff_sum = 0.0;
    for row in z.rows() {
        fill_spot_path(gbm.spot, step, row, &mut spots);
        let average = spots.iter().sum::<f64>() / fixings as f64;
        payoff_sum += option.intrinsic(average);
    }

    Ok(gbm.discount() * payoff_sum / paths as f64)
}
