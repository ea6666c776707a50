//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: Errors specific to the closed-form formulas

use pricer_core::types::PricingError;
use thiserror::Error;

/// Analytical pricing errors.
///
/// Provides structured error handling for closed-form pricing with
/// descriptive context for each failure mode.
///
/// # Variants
/// - `InvalidVolatility`: Non-positive volatility before expiry
/// - `InvalidSpot`: Non-positive spot price
/// - `InvalidStrike`: Non-positive strike
/// - `InvalidPayout`: Non-positive digital payout
/// - `StrikeOrdering`: Call spread strikes in the wrong order
/// - `MissingParameter`: A kind-specific parameter was not supplied
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid digital payout (non-positive).
    #[error("Invalid payout: {payout} (must be > 0)")]
    InvalidPayout {
        /// The invalid payout value
        payout: f64,
    },

    /// Call spread with `strike_short <= strike_long`.
    #[error("strike_short must be > strike_long (got long {strike_long}, short {strike_short})")]
    StrikeOrdering {
        /// Strike of the long call
        strike_long: f64,
        /// Strike of the short call
        strike_short: f64,
    },

    /// A parameter required by the selected formula is missing.
    #[error("Missing parameter: {name}")]
    MissingParameter {
        /// Parameter key
        name: &'static str,
    },
}

impl AnalyticalError {
    /// Fails unless `strike` is finite and strictly positive.
    pub(crate) fn check_strike(strike: f64) -> Result<(), Self> {
        if strike.is_finite() && strike > 0.0 {
            Ok(())
        } else {
            Err(AnalyticalError::InvalidStrike { strike })
        }
    }

    /// Fails unless `volatility` is finite and strictly positive.
    pub(crate) fn check_volatility(volatility: f64) -> Result<(), Self> {
        if volatility.is_finite() && volatility > 0.0 {
            Ok(())
        } else {
            Err(AnalyticalError::InvalidVolatility { volatility })
        }
    }
}

impl From<AnalyticalError> for PricingError {
    fn from(err: AnalyticalError) -> Self {
        match err {
            AnalyticalError::InvalidVolatility { .. }
            | AnalyticalError::InvalidSpot { .. }
            | AnalyticalError::InvalidStrike { .. }
            | AnalyticalError::InvalidPayout { .. } => PricingError::Domain(err.to_string()),
            AnalyticalError::StrikeOrdering { .. } | AnalyticalError::MissingParameter { .. } => {
                PricingError::Configuration(err.to_string())
            }
        }
    }
}
