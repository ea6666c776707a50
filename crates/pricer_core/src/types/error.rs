//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: the error every pricer, Greeks routine and leg parser
//!   ultimately reports
//! - `ensure_positive` / `ensure_finite`: input guards shared by the pricers
//!
//! The taxonomy has two families. `Domain` covers invalid numeric inputs and
//! unsupported option types, barrier directions, instrument types or methods.
//! `Configuration` covers structurally invalid requests: step/path counts out
//! of range, call spread strikes in the wrong order, random-draw matrices of
//! the wrong shape. Both are always attributable to a single leg.

use thiserror::Error;

/// Categorised pricing errors.
///
/// # Variants
/// - `Domain`: Invalid numeric input or unsupported product combination
/// - `Configuration`: Invalid numerical settings or mismatched inputs
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::Domain("spot must be > 0".to_string());
/// assert_eq!(format!("{}", err), "Domain error: spot must be > 0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PricingError {
    /// Invalid numeric input or unsupported product combination.
    #[error("Domain error: {0}")]
    Domain(String),

    /// Invalid configuration (steps, paths, strike ordering, draw shapes).
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PricingError {
    /// Creates a `Domain` error from any displayable message.
    pub fn domain(msg: impl Into<String>) -> Self {
        PricingError::Domain(msg.into())
    }

    /// Creates a `Configuration` error from any displayable message.
    pub fn configuration(msg: impl Into<String>) -> Self {
        PricingError::Configuration(msg.into())
    }

    /// Returns true for the `Domain` family.
    #[inline]
    pub fn is_domain(&self) -> bool {
        matches!(self, PricingError::Domain(_))
    }

    /// Returns true for the `Configuration` family.
    #[inline]
    pub fn is_configuration(&self) -> bool {
        matches!(self, PricingError::Configuration(_))
    }
}

/// Fails with a `Domain` error unless `value` is finite and strictly positive.
///
/// NaN is rejected.
///
/// # Examples
/// ```
/// use pricer_core::types::error::ensure_positive;
///
/// assert!(ensure_positive("strike", 100.0).is_ok());
/// assert!(ensure_positive("strike", 0.0).is_err());
/// assert!(ensure_positive("strike", f64::NAN).is_err());
/// ```
#[inline]
pub fn ensure_positive(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(PricingError::Domain(format!("{} must be > 0 (got {})", name, value)))
    }
}

/// Fails with a `Domain` error unless `value` is finite.
#[inline]
pub fn ensure_finite(name: &str, value: f64) -> Result<(), PricingError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(PricingError::Domain(format!("{} must be finite (got {})", name, value)))
    }
}
