//! Portfolio error types.
//!
//! This module provides structured error types for portfolio operations
//! using `thiserror` for derivation.

use pricer_core::types::PricingError;
use thiserror::Error;

/// Errors that can occur during portfolio operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PortfolioError {
    /// A leg failed to parse or price in strict mode.
    #[error("leg '{leg_id}' failed: {source}")]
    LegFailed {
        /// Identifier of the failing leg
        leg_id: String,
        /// Underlying pricing error
        #[source]
        source: PricingError,
    },

    /// Scenario grid axes out of bounds or not finite.
    #[error("Invalid scenario grid: {0}")]
    InvalidGrid(String),

    /// Spot ladder bounds or step count out of range.
    #[error("Invalid spot ladder: {0}")]
    InvalidLadder(String),
}

impl PortfolioError {
    /// Leg identifier for `LegFailed`, `None` otherwise.
    pub fn leg_id(&self) -> Option<&str> {
        match self {
            PortfolioError::LegFailed { leg_id, .. } => Some(leg_id),
            _ => None,
        }
    }
}
