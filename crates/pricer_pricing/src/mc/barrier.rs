//! Knock-out barrier options by Monte Carlo under GBM.
//!
//! Up-and-out and down-and-out calls and puts, monitored either at the
//! simulation dates only ([`BarrierMonitoring::Discrete`]) or with a
//! Brownian-bridge crossing test inside every step
//! ([`BarrierMonitoring::BrownianBridge`]), which removes most of the
//! discrete-monitoring bias.
//!
//! # Draw layout
//!
//! Normals `z` are `paths × steps`. In bridge mode a second
//! `paths × steps` matrix of uniforms `u` is drawn from the same seeded
//! stream right after `z`.

use pricer_core::types::{BarrierDirection, MarketState, PricingError};
use pricer_models::instruments::{BarrierMonitoring, McParams, OptionContract};

use super::config::{McConfig, Prepared};
use super::error::ConfigError;
use super::paths::{fill_spot_path, GbmParams};
use crate::rng::{DrawKey, DrawMatrix, PricerRng, RandomDrawCache};

/// Barrier level and side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KnockOutBarrier {
    /// Barrier level (> 0)
    pub level: f64,
    /// Knock-out side
    pub direction: BarrierDirection,
}

impl KnockOutBarrier {
    /// Creates a barrier.
    #[inline]
    pub fn new(level: f64, direction: BarrierDirection) -> Self {
        Self { level, direction }
    }

    #[inline]
    fn is_breached(&self, spot: f64) -> bool {
        self.direction.is_breached(spot, self.level)
    }

    /// Probability that a bridge between two safe-side endpoints touched
    /// the barrier.
    #[inline]
    fn crossing_probability(&self, s0: f64, s1: f64, sigma2_dt: f64) -> f64 {
        let (ln0, ln1) = match self.direction {
            BarrierDirection::Up => ((self.level / s0).ln(), (self.level / s1).ln()),
            BarrierDirection::Down => ((s0 / self.level).ln(), (s1 / self.level).ln()),
        };
        (-2.0 * ln0 * ln1 / sigma2_dt).exp()
    }
}

fn prepare(
    option: &OptionContract,
    barrier: KnockOutBarrier,
    market: &MarketState,
    mc: McParams,
) -> Result<Prepared, PricingError> {
    let spot = market.spot();
    if !(option.strike.is_finite() && option.strike > 0.0)
        || !(barrier.level.is_finite() && barrier.level > 0.0)
    {
        return Err(PricingError::domain("spot, strike, and barrier_level must be > 0"));
    }
    if option.time_to_expiry <= 0.0 {
        if barrier.is_breached(spot) {
            return Ok(Prepared::Settled(0.0));
        }
        return Ok(Prepared::Settled(option.intrinsic(spot)));
    }
    market.require_vol()?;
    let config = McConfig::try_from(mc)?;
    if barrier.is_breached(spot) {
        return Ok(Prepared::Settled(0.0));
    }
    Ok(Prepared::Simulate(config))
}

/// Prices a knock-out barrier option with draws generated from `mc.seed`.
///
/// # Errors
/// - `Domain` if strike or barrier level is not positive, or vol ≤ 0
/// - `Configuration` if paths or steps are out of range
///
/// # Examples
///
/// ```rust
/// use pricer_core::types::{BarrierDirection, MarketState, OptionType};
/// use pricer_models::instruments::{BarrierMonitoring, McParams, OptionContract};
/// use pricer_pricing::mc::{price_mc_barrier, KnockOutBarrier};
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let option = OptionContract::new(OptionType::Call, 100.0, 1.0).unwrap();
/// let barrier = KnockOutBarrier::new(130.0, BarrierDirection::Up);
/// let mc = McParams { paths: 2_000, steps: 24, seed: 7 };
///
/// let price = price_mc_barrier(&option, barrier, BarrierMonitoring::Discrete, &market, mc).unwrap();
/// assert!(price > 0.0 && price < 10.46);
/// ```
pub fn price_mc_barrier(
    option: &OptionContract,
    barrier: KnockOutBarrier,
    monitoring: BarrierMonitoring,
    market: &MarketState,
    mc: McParams,
) -> Result<f64, PricingError> {
    let config = match prepare(option, barrier, market, mc)? {
        Prepared::Settled(value) => return Ok(value),
        Prepared::Simulate(config) => config,
    };
    let (z, u) = draw(config, monitoring);
    simulate(option, barrier, monitoring, market, config, &z, u.as_ref())
}

/// Prices a knock-out barrier option on caller-supplied draws.
///
/// `z` must be `paths × steps`; in bridge mode `u` is required with the
/// same shape. `u` is ignored under discrete monitoring.
///
/// # Errors
/// As [`price_mc_barrier`], plus `Configuration` on a draw shape mismatch
/// or missing uniforms in bridge mode.
pub fn price_mc_barrier_with_draws(
    option: &OptionContract,
    barrier: KnockOutBarrier,
    monitoring: BarrierMonitoring,
    market: &MarketState,
    mc: McParams,
    z: &DrawMatrix,
    u: Option<&DrawMatrix>,
) -> Result<f64, PricingError> {
    let config = match prepare(option, barrier, market, mc)? {
        Prepared::Settled(value) => return Ok(value),
        Prepared::Simulate(config) => config,
    };
    simulate(option, barrier, monitoring, market, config, z, u)
}

/// Prices through a draw cache, drawing from `mc.seed` on first use.
///
/// Every later call with the same cache reuses the stored draws, which is
/// what keeps bumped re-prices on common random numbers.
pub fn price_mc_barrier_cached(
    option: &OptionContract,
    barrier: KnockOutBarrier,
    monitoring: BarrierMonitoring,
    market: &MarketState,
    mc: McParams,
    cache: &mut RandomDrawCache,
) -> Result<f64, PricingError> {
    let config = match prepare(option, barrier, market, mc)? {
        Prepared::Settled(value) => return Ok(value),
        Prepared::Simulate(config) => config,
    };
    if !cache.contains(DrawKey::Normal) {
        let (z, u) = draw(config, monitoring);
        cache.insert(DrawKey::Normal, z);
        if let Some(u) = u {
            cache.insert(DrawKey::Uniform, u);
        }
    }
    let z = cache
        .get(DrawKey::Normal)
        .ok_or(ConfigError::MissingDraws { name: "z" })?;
    simulate(
        option,
        barrier,
        monitoring,
        market,
        config,
        z,
        cache.get(DrawKey::Uniform),
    )
}

fn draw(config: McConfig, monitoring: BarrierMonitoring) -> (DrawMatrix, Option<DrawMatrix>) {
    let mut rng = PricerRng::from_seed(config.seed());
    let z = rng.normal_matrix(config.paths(), config.steps());
    let u = match monitoring {
        BarrierMonitoring::BrownianBridge => Some(rng.uniform_matrix(config.paths(), config.steps())),
        BarrierMonitoring::Discrete => None,
    };
    (z, u)
}

fn simulate(
    option: &OptionContract,
    barrier: KnockOutBarrier,
    monitoring: BarrierMonitoring,
    market: &MarketState,
    config: McConfig,
    z: &DrawMatrix,
    u: Option<&DrawMatrix>,
) -> Result<f64, PricingError> {
    let (paths, steps) = (config.paths(), config.steps());
    z.ensure_shape("z", paths, steps)?;
    let u = match monitoring {
        BarrierMonitoring::BrownianBridge => {
            let u = u.ok_or(ConfigError::MissingDraws { name: "u" })?;
            u.ensure_shape("u", paths, steps)?;
            Some(u)
        }
        BarrierMonitoring::Discrete => None,
    };

    let gbm = GbmParams::new(
        market.spot(),
        market.rate(),
        market.dividend_yield(),
        market.vol(),
        option.time_to_expiry,
    );
    let step = gbm.step(steps);
    let sigma2_dt = gbm.volatility * gbm.volatility * step.dt;

    let mut spots = vec![0.0; steps];
    let mut payoff_sum = 0.0;
    for path in 0..paths {
        fill_spot_path(gbm.spot, step, z.row(path), &mut spots);
        let uniforms = u.map(|u| u.row(path));
        if let Some(terminal) = surviving_terminal(gbm.spot, &spots, sigma2_dt, barrier, uniforms) {
            payoff_sum += option.intrinsic(terminal);
        }
    }

    Ok(gbm.discount() * payoff_sum / paths as f64)
}

/// Walks one path; `None` if it knocked out.
#[inline]
fn surviving_terminal(
    spot: f64,
    spots: &[f64],
    sigma2_dt: f64,
    barrier: KnockOutBarrier,
    u: Option<&[f64]>,
) -> Option<f64> {
    let mut s = spot;
    for (i, &s_next) in spots.iter().enumerate() {
        let mut hit = barrier.is_breached(s_next) || barrier.is_breached(s);
        if !hit {
            if let Some(u) = u {
                hit = u[i] < barrier.crossing_probability(s, s_next, sigma2_dt);
            }
        }
        if hit {
            return None;
        }
        s = s_next;
    }
    Some(s)
}
