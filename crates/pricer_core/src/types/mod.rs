//! Core market, sensitivity and error types.
//!
//! This module provides:
//! - `market`: [`MarketState`] snapshot, [`OptionType`], [`BarrierDirection`]
//! - `greeks`: [`Greeks`] with per-unit sensitivity conventions
//! - `error`: [`PricingError`] and shared input guards
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod error;
pub mod greeks;
pub mod market;

pub use error::PricingError;
pub use greeks::Greeks;
pub use market::{BarrierDirection, MarketState, OptionType};
