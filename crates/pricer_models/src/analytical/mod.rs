//! Analytical pricing formulas.
//!
//! This module provides closed-form solutions for:
//! - Black-Scholes vanilla options with dividend yield, analytic Greeks
//! - Call spreads (difference of two Black-Scholes calls)
//! - Cash-or-nothing digitals
//! - Continuous geometric-average Asian options
//! - Discounted forwards
//!
//! Every formula returns intrinsic/payoff value at `time_to_expiry <= 0`
//! and only validates volatility before expiry.

pub mod asian;
pub mod black_scholes;
pub mod closed_form;
pub mod digital;
pub mod error;
pub mod forward;

// Re-export main types at module level
pub use asian::asian_geometric_continuous_price;
pub use black_scholes::{black_scholes_price_and_greeks, call_spread_price_and_greeks, BlackScholes};
pub use closed_form::{analytic_price_and_greeks, price_closed_form, ClosedFormKind, ClosedFormParams};
pub use digital::digital_cash_or_nothing_price;
pub use error::AnalyticalError;
pub use forward::forward_value;
