//! Portfolio valuation.
//!
//! Legs arrive in their loose wire form ([`LegRequest`]) so that a malformed
//! leg can be reported against its `leg_id` instead of failing the request.
//!
//! [`LegRequest`]: pricer_models::instruments::LegRequest

mod error;
mod valuation;

pub use error::PortfolioError;
pub use valuation::{
    price_portfolio, price_portfolio_price_only, LegResult, LegStatus, PortfolioRequest, PortfolioValuation,
    ValuationSummary,
};
