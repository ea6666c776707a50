//! Criterion benchmarks for pricer_risk portfolio analytics.
//!
//! Benchmarks cover:
//! - Portfolio valuation with Greeks for growing books
//! - Scenario grids, sequential vs Rayon rows
//! - Payoff curve and P&L profile over a fine spot ladder

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::types::MarketState;
use pricer_models::instruments::{LegParams, LegRequest};
use pricer_risk::payoff::{pnl_profile, spot_ladder};
use pricer_risk::portfolio::price_portfolio;
use pricer_risk::scenarios::scenario_grid_with_config;
use pricer_risk::ParallelConfig;

fn market() -> MarketState {
    MarketState::new(100.0, 0.04, 0.01, 0.22).unwrap()
}

/// Strip of closed-form and lattice legs across strikes.
fn book(n_legs: usize) -> Vec<LegRequest> {
    (0..n_legs)
        .map(|i| {
            let strike = 80.0 + (i % 9) as f64 * 5.0;
            let option_type = if i % 2 == 0 { "call" } else { "put" };
            let params = LegParams::new()
                .with("option_type", option_type)
                .with("strike", strike)
                .with("time_to_expiry", 0.5 + (i % 4) as f64 * 0.25);
            let (instrument_type, method) = match i % 3 {
                0 => ("vanilla", "black_scholes"),
                1 => ("digital", "black_scholes"),
                _ => ("american", "binomial_crr"),
            };
            let quantity = if i % 5 == 0 { -1.0 } else { 1.0 };
            LegRequest::new(format!("L{}", i), instrument_type, method, quantity, params.with("steps", 100))
        })
        .collect()
}

fn bench_portfolio_valuation(c: &mut Criterion) {
    let mut group = c.benchmark_group("portfolio_valuation");
    let market = market();

    for n_legs in [5, 20, 50] {
        let legs = book(n_legs);
        group.bench_with_input(BenchmarkId::new("with_greeks", n_legs), &legs, |b, legs| {
            b.iter(|| price_portfolio(black_box(&market), black_box(legs), false))
        });
    }

    group.finish();
}

fn bench_scenario_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("scenario_grid");
    group.sample_size(20);
    let market = market();
    let legs = book(12);
    let spots: Vec<f64> = (-7..=7).map(|i| i as f64 * 5.0).collect();
    let vols: Vec<f64> = (-7..=7).map(|i| i as f64 * 0.02).collect();

    for (label, config) in [
        ("sequential", ParallelConfig::sequential()),
        ("rayon", ParallelConfig::new(1)),
    ] {
        group.bench_function(BenchmarkId::new("15x15", label), |b| {
            b.iter(|| {
                scenario_grid_with_config(
                    black_box(&market),
                    black_box(&legs),
                    black_box(&spots),
                    black_box(&vols),
                    25.0,
                    &config,
                )
            })
        });
    }

    group.finish();
}

fn bench_pnl_profile(c: &mut Criterion) {
    let legs = book(20);
    let spots = spot_ladder(40.0, 160.0, 401).unwrap();

    c.bench_function("pnl_profile_401", |b| {
        b.iter(|| pnl_profile(black_box(&legs), black_box(12.5), black_box(&spots)))
    });
}

criterion_group!(benches, bench_portfolio_valuation, bench_scenario_grid, bench_pnl_profile);
criterion_main!(benches);
