//! Cross-engine properties of the pricing engines.
//!
//! # Test Categories
//!
//! 1. **Put-call parity** and price bounds (proptest)
//! 2. **Lattice convergence** to Black-Scholes, early-exercise premium
//! 3. **Barrier Monte Carlo** vs the continuous-monitoring closed form
//! 4. **Asian ordering**: geometric closed form vs arithmetic Monte Carlo
//! 5. **Expiry boundary** for every engine

use approx::assert_relative_eq;
use pricer_core::math::norm_cdf;
use pricer_core::types::{BarrierDirection, MarketState, OptionType};
use pricer_models::analytical::{asian_geometric_continuous_price, black_scholes_price_and_greeks};
use pricer_models::instruments::{BarrierMonitoring, McParams, OptionContract};
use pricer_pricing::lattice::price_binomial;
use pricer_pricing::mc::{price_mc_asian_arithmetic, price_mc_barrier, KnockOutBarrier};
use proptest::prelude::*;

fn standard_market() -> MarketState {
    MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap()
}

/// Continuously monitored up-and-out call, barrier above strike.
fn up_and_out_call(market: &MarketState, strike: f64, barrier: f64, t: f64) -> f64 {
    let (s, r, q, v) = (market.spot(), market.rate(), market.dividend_yield(), market.vol());
    let b = r - q;
    let mu = (b - 0.5 * v * v) / (v * v);
    let st = v * t.sqrt();
    let x = (s / strike).ln() / st + (1.0 + mu) * st;
    let x1 = (s / barrier).ln() / st + (1.0 + mu) * st;
    let y = (barrier * barrier / (s * strike)).ln() / st + (1.0 + mu) * st;
    let y1 = (barrier / s).ln() / st + (1.0 + mu) * st;
    let carry = ((b - r) * t).exp();
    let df = (-r * t).exp();
    let hs = barrier / s;

    let a = s * carry * norm_cdf(x) - strike * df * norm_cdf(x - st);
    let bb = s * carry * norm_cdf(x1) - strike * df * norm_cdf(x1 - st);
    let c = s * carry * hs.powf(2.0 * (mu + 1.0)) * norm_cdf(-y) - strike * df * hs.powf(2.0 * mu) * norm_cdf(-y + st);
    let d =
        s * carry * hs.powf(2.0 * (mu + 1.0)) * norm_cdf(-y1) - strike * df * hs.powf(2.0 * mu) * norm_cdf(-y1 + st);
    a - bb + c - d
}

// ============================================================================
// Parity and bounds
// ============================================================================

proptest! {
    #[test]
    fn prop_put_call_parity(
        spot in 50.0..150.0_f64,
        strike in 50.0..150.0_f64,
        rate in -0.02..0.10_f64,
        q in 0.0..0.05_f64,
        vol in 0.05..0.8_f64,
        t in 0.05..3.0_f64,
    ) {
        let market = MarketState::new(spot, rate, q, vol).unwrap();
        let (c, _) = black_scholes_price_and_greeks(OptionType::Call, &market, strike, t).unwrap();
        let (p, _) = black_scholes_price_and_greeks(OptionType::Put, &market, strike, t).unwrap();
        let forward = spot * (-q * t).exp() - strike * (-rate * t).exp();
        prop_assert!((c - p - forward).abs() < 1e-4 * spot.max(strike));
    }

    #[test]
    fn prop_american_not_below_european(
        spot in 70.0..130.0_f64,
        vol in 0.1..0.5_f64,
        t in 0.1..2.0_f64,
    ) {
        let market = MarketState::new(spot, 0.05, 0.02, vol).unwrap();
        for option_type in [OptionType::Call, OptionType::Put] {
            let e = price_binomial(option_type, &market, 100.0, t, 60, false).unwrap();
            let a = price_binomial(option_type, &market, 100.0, t, 60, true).unwrap();
            prop_assert!(a >= e - 1e-12);
            prop_assert!(a >= option_type.intrinsic(spot, 100.0) - 1e-12);
        }
    }
}

// ============================================================================
// Lattice
// ============================================================================

#[test]
fn test_binomial_converges_with_dividends() {
    let market = MarketState::new(100.0, 0.05, 0.03, 0.25).unwrap();
    for strike in [80.0, 100.0, 120.0] {
        let (bs, _) = black_scholes_price_and_greeks(OptionType::Put, &market, strike, 1.5).unwrap();
        let tree = price_binomial(OptionType::Put, &market, strike, 1.5, 800, false).unwrap();
        assert!((tree - bs).abs() < 0.02, "K={} tree {} bs {}", strike, tree, bs);
    }
}

// ============================================================================
// Barrier Monte Carlo
// ============================================================================

#[test]
fn test_bridge_matches_continuous_closed_form() {
    let market = standard_market();
    let option = OptionContract::new(OptionType::Call, 100.0, 1.0).unwrap();
    let barrier = KnockOutBarrier::new(130.0, BarrierDirection::Up);
    let mc = McParams {
        paths: 40_000,
        steps: 24,
        seed: 7,
    };

    let exact = up_and_out_call(&market, 100.0, 130.0, 1.0);
    let bridge = price_mc_barrier(&option, barrier, BarrierMonitoring::BrownianBridge, &market, mc).unwrap();
    let discrete = price_mc_barrier(&option, barrier, BarrierMonitoring::Discrete, &market, mc).unwrap();

    assert!((bridge - exact).abs() < 0.15, "bridge {} exact {}", bridge, exact);
    // coarse monitoring misses crossings and overprices
    assert!(discrete > exact + 0.3, "discrete {} exact {}", discrete, exact);
}

#[test]
fn test_barrier_below_vanilla() {
    let market = standard_market();
    let put = OptionContract::new(OptionType::Put, 100.0, 1.0).unwrap();
    let (vanilla, _) = black_scholes_price_and_greeks(OptionType::Put, &market, 100.0, 1.0).unwrap();
    let mc = McParams {
        paths: 10_000,
        steps: 50,
        seed: 3,
    };
    for monitoring in [BarrierMonitoring::Discrete, BarrierMonitoring::BrownianBridge] {
        let p = price_mc_barrier(
            &put,
            KnockOutBarrier::new(85.0, BarrierDirection::Down),
            monitoring,
            &market,
            mc,
        )
        .unwrap();
        assert!(p > 0.0 && p < vanilla, "{:?}: {} vs vanilla {}", monitoring, p, vanilla);
    }
}

#[test]
fn test_seed_changes_price() {
    let market = standard_market();
    let option = OptionContract::new(OptionType::Call, 100.0, 1.0).unwrap();
    let barrier = KnockOutBarrier::new(140.0, BarrierDirection::Up);
    let a = McParams {
        paths: 2_000,
        steps: 12,
        seed: 1,
    };
    let b = McParams { seed: 2, ..a };
    let pa = price_mc_barrier(&option, barrier, BarrierMonitoring::Discrete, &market, a).unwrap();
    let pb = price_mc_barrier(&option, barrier, BarrierMonitoring::Discrete, &market, b).unwrap();
    assert_ne!(pa, pb);
}

// ============================================================================
// Asian ordering
// ============================================================================

#[test]
fn test_geometric_below_arithmetic() {
    for (strike, option_type) in [(90.0, OptionType::Call), (100.0, OptionType::Call), (110.0, OptionType::Call)] {
        let market = standard_market();
        let option = OptionContract::new(option_type, strike, 1.0).unwrap();
        let geometric = asian_geometric_continuous_price(option_type, &market, strike, 1.0).unwrap();
        let arithmetic = price_mc_asian_arithmetic(&option, &market, 52, 20_000, 11).unwrap();
        assert!(arithmetic + 0.1 >= geometric, "K={}: arith {} geo {}", strike, arithmetic, geometric);
    }
}

// ============================================================================
// Expiry boundary
// ============================================================================

#[test]
fn test_every_engine_pays_intrinsic_at_expiry() {
    let market = MarketState::new(120.0, 0.05, 0.0, 0.2).unwrap();
    let call = OptionContract::new(OptionType::Call, 100.0, 0.0).unwrap();
    let mc = McParams {
        paths: 10,
        steps: 10,
        seed: 1,
    };

    assert_relative_eq!(price_binomial(OptionType::Call, &market, 100.0, 0.0, 10, false).unwrap(), 20.0);
    assert_relative_eq!(price_binomial(OptionType::Call, &market, 100.0, -1.0, 10, true).unwrap(), 20.0);
    assert_relative_eq!(price_mc_asian_arithmetic(&call, &market, 5, 10, 1).unwrap(), 20.0);
    assert_relative_eq!(
        price_mc_barrier(
            &call,
            KnockOutBarrier::new(150.0, BarrierDirection::Up),
            BarrierMonitoring::Discrete,
            &market,
            mc
        )
        .unwrap(),
        20.0
    );
    assert_relative_eq!(
        black_scholes_price_and_greeks(OptionType::Call, &market, 100.0, 0.0).unwrap().0,
        20.0
    );
}
