//! # Pricer Risk (L4: Application)
//!
//! Portfolio-level analytics built on the instrument pricer façade.
//!
//! This crate provides:
//! - Portfolio valuation with per-leg results, quantity-weighted totals and
//!   strict or lenient failure handling (`portfolio`)
//! - Spot × vol scenario grids, parallelised with Rayon (`scenarios`)
//! - Terminal payoff curves, P&L at expiry and breakevens (`payoff`)
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  portfolio/  - valuation, LegResult     │
//! │  scenarios/  - spot × vol grid          │
//! │  payoff/     - payoff curve, P&L        │
//! │  parallel/   - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  closed form, CRR, Monte Carlo, FD      │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::types::MarketState;
//! use pricer_models::instruments::{LegParams, LegRequest};
//! use pricer_risk::portfolio::price_portfolio;
//! use pricer_risk::scenarios::scenario_grid;
//!
//! let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
//! let terms = LegParams::new().with("strike", 100.0).with("time_to_expiry", 1.0);
//! let legs = vec![
//!     LegRequest::new("call", "vanilla", "black_scholes", 1.0, terms.clone()),
//!     LegRequest::new("put", "vanilla", "black_scholes", 1.0, terms.with("option_type", "put")),
//! ];
//!
//! let valuation = price_portfolio(&market, &legs, true).unwrap();
//! assert_eq!(valuation.summary.ok, 2);
//!
//! let grid = scenario_grid(&market, &legs, &[-10.0, 0.0, 10.0], &[0.0], 0.0).unwrap();
//! assert!((grid.base_total - valuation.total_price).abs() < 1e-9);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod parallel;
pub mod payoff;
pub mod portfolio;
pub mod scenarios;

// Re-export commonly used types
pub use parallel::{ParallelConfig, DEFAULT_PARALLEL_THRESHOLD};
pub use payoff::{payoff_curve, pnl_profile, spot_ladder, terminal_slope_high, PayoffCurve, PnlProfile};
pub use portfolio::{
    price_portfolio, price_portfolio_price_only, LegResult, LegStatus, PortfolioError, PortfolioRequest,
    PortfolioValuation,
};
pub use scenarios::{scenario_grid, scenario_grid_with_config, ScenarioGrid};
