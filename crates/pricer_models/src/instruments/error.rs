//! Instrument error types.
//!
//! This module provides structured error handling for turning loosely typed
//! leg requests into validated [`Product`](super::Product)s.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Instrument-related errors.
///
/// # Variants
/// - `UnknownInstrumentType`: `instrument_type` is not one of the six supported types
/// - `UnsupportedMethod`: the method key is not valid for the instrument type
/// - `InvalidParameter`: a parameter is missing, of the wrong type or out of its domain
/// - `OutOfRange`: a count (steps, paths, fixings) is outside its allowed range
/// - `ZeroQuantity`: a leg with zero quantity
///
/// # Examples
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::UnknownInstrumentType { instrument_type: "swap".into() };
/// assert!(format!("{}", err).contains("swap"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Unknown instrument type.
    #[error("unsupported instrument_type '{instrument_type}'")]
    UnknownInstrumentType {
        /// The rejected key
        instrument_type: String,
    },

    /// Method not supported for the instrument type.
    #[error("unsupported method '{method}' for {instrument_type}")]
    UnsupportedMethod {
        /// Instrument type key
        instrument_type: String,
        /// The rejected method key
        method: String,
    },

    /// Invalid parameter value.
    #[error("invalid parameter '{key}': {message}")]
    InvalidParameter {
        /// Parameter key
        key: String,
        /// Description of the problem
        message: String,
    },

    /// Count parameter outside its permitted range.
    #[error("{key} must be in [{min}, {max}] (got {value})")]
    OutOfRange {
        /// Parameter key
        key: String,
        /// Supplied value
        value: i128,
        /// Inclusive lower bound
        min: usize,
        /// Inclusive upper bound
        max: usize,
    },

    /// Leg quantity of zero.
    #[error("quantity must be non-zero (leg '{leg_id}')")]
    ZeroQuantity {
        /// Leg identifier
        leg_id: String,
    },
}

impl InstrumentError {
    pub(crate) fn invalid(key: &str, message: impl Into<String>) -> Self {
        InstrumentError::InvalidParameter {
            key: key.to_string(),
            message: message.into(),
        }
    }
}

impl From<InstrumentError> for PricingError {
    fn from(err: InstrumentError) -> Self {
        match err {
            InstrumentError::OutOfRange { .. } => PricingError::Configuration(err.to_string()),
            InstrumentError::UnknownInstrumentType { .. }
            | InstrumentError::UnsupportedMethod { .. }
            | InstrumentError::InvalidParameter { .. }
            | InstrumentError::ZeroQuantity { .. } => PricingError::Domain(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = InstrumentError::UnsupportedMethod {
            instrument_type: "american".into(),
            method: "black_scholes".into(),
        };
        assert_eq!(err.to_string(), "unsupported method 'black_scholes' for american");

        let err = InstrumentError::OutOfRange {
            key: "steps".into(),
            value: 0,
            min: 1,
            max: 10_000,
        };
        assert_eq!(err.to_string(), "steps must be in [1, 10000] (got 0)");
    }

    #[test]
    fn test_conversion_families() {
        let e: PricingError = InstrumentError::invalid("strike", "must be > 0").into();
        assert!(e.is_domain());
        assert_eq!(e.to_string(), "Domain error: invalid parameter 'strike': must be > 0");

        let e: PricingError = InstrumentError::OutOfRange {
            key: "paths".into(),
            value: -1,
            min: 1,
            max: 10,
        }
        .into();
        assert!(e.is_configuration());

        let e: PricingError = InstrumentError::ZeroQuantity { leg_id: "a".into() }.into();
        assert!(e.is_domain());
    }
}
