//! Instrument definitions.
//!
//! # Architecture
//!
//! Uses enum dispatch (NOT trait objects):
//! - [`InstrumentType`] and [`Method`] are closed key sets with string parsing
//! - [`Product`] embeds the pricing method in each variant, so only
//!   supported `(instrument_type, method)` pairs exist after parsing
//! - [`LegRequest`] is the loose wire form; [`InstrumentLeg`] the validated one
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{LegParams, LegRequest, Product};
//!
//! let params = LegParams::new()
//!     .with("option_type", "call")
//!     .with("strike", 100.0)
//!     .with("time_to_expiry", 1.0);
//! let leg = LegRequest::new("L1", "vanilla", "black_scholes", 2.0, params)
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(leg.quantity(), 2.0);
//! assert_eq!(leg.product().terminal_payoff(110.0), Some(10.0));
//! ```

mod error;
mod kind;
mod leg;
mod params;
mod product;

pub use error::InstrumentError;
pub use kind::{InstrumentType, Method};
pub use leg::{InstrumentLeg, LegRequest};
pub use params::LegParams;
pub use product::{
    AsianMethod, BarrierMonitoring, McParams, OptionContract, Product, VanillaMethod, DEFAULT_AMERICAN_STEPS,
    DEFAULT_ASIAN_FIXINGS, DEFAULT_ASIAN_PATHS, DEFAULT_ASIAN_SEED, DEFAULT_BARRIER_MC, DEFAULT_DIGITAL_PAYOUT,
    DEFAULT_VANILLA_STEPS, MAX_PATHS, MAX_STEPS,
};
