//! # pricer_core: Foundation Types for the Pricing Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the workspace, providing:
//! - Market snapshot and option flavours: `MarketState`, `OptionType`,
//!   `BarrierDirection` (`types::market`)
//! - Sensitivities: `Greeks` (`types::greeks`)
//! - Error taxonomy: `PricingError` (`types::error`)
//! - Standard normal CDF/PDF (`math::distributions`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external
//! dependencies:
//! - num-traits: generic numerical code
//! - thiserror: error derivation
//! - serde: serialisation of market inputs and results
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::norm_cdf;
//! use pricer_core::types::{Greeks, MarketState, OptionType};
//!
//! let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
//! assert_eq!(market.spot(), 100.0);
//!
//! let call: OptionType = "call".parse().unwrap();
//! assert_eq!(call.intrinsic(110.0, 100.0), 10.0);
//!
//! let total = Greeks::new(0.5, 0.02, 30.0, -5.0, 40.0).scale(2.0);
//! assert_eq!(total.delta, 1.0);
//!
//! assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;
