//! # Pricer Pricing (L3: Numerical Engines)
//!
//! Numerical engines and the instrument pricer façade.
//!
//! This crate provides:
//! - Seeded random draws and the call-scoped [`rng::RandomDrawCache`]
//! - Cox–Ross–Rubinstein binomial lattice, European and American (`lattice`)
//! - Monte Carlo knock-out barriers (discrete or Brownian-bridge monitoring)
//!   and arithmetic-average Asians (`mc`)
//! - Bump-and-revalue Greeks for any price function (`greeks`)
//! - The façade pricing a [`pricer_models::instruments::Product`] with or
//!   without Greeks (`pricer`)
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::types::MarketState;
//! use pricer_models::instruments::LegParams;
//! use pricer_pricing::pricer::price_leg_with_greeks;
//!
//! let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
//! let params = LegParams::new()
//!     .with("option_type", "put")
//!     .with("strike", 100.0)
//!     .with("time_to_expiry", 1.0);
//!
//! let result = price_leg_with_greeks("american", "binomial_crr", &market, &params).unwrap();
//! assert!(result.price_per_unit > 5.57);
//! assert!(result.greeks.delta < 0.0);
//! ```
//!
//! ## Reproducibility
//!
//! Monte Carlo results are bit-identical for identical seed, paths and
//! steps. Greeks of Monte Carlo products reuse one set of draws for the base
//! price and every bump.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod greeks;
pub mod lattice;
pub mod mc;
pub mod pricer;
pub mod rng;

pub use greeks::{
    finite_difference_evaluation, finite_difference_greeks, BumpSizes, FdEvaluation, FdScheme, FdSchemes,
};
pub use pricer::{
    price_and_greeks_closed_form, price_leg, price_leg_with_greeks, price_product, price_product_with_greeks,
    PricedResult,
};
