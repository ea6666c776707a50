//! Error types for the Monte Carlo and lattice engines.
//!
//! This module defines structured error types for configuration validation
//! and for caller-supplied random draws.

use std::fmt;

use pricer_core::types::PricingError;

use super::config::{MAX_PATHS, MAX_STEPS};

/// Configuration error for the numerical engines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Path count outside valid range [1, 10_000_000].
    InvalidPathCount(usize),
    /// Step (or fixing) count outside valid range [1, 10_000].
    InvalidStepCount(usize),
    /// Invalid parameter value with name and description.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Description of the invalid value.
        value: String,
    },
    /// Supplied draws do not match the simulation grid.
    DrawShapeMismatch {
        /// Draw name ("z" or "u").
        name: &'static str,
        /// Expected (paths, steps).
        expected: (usize, usize),
        /// Supplied (rows, cols).
        actual: (usize, usize),
    },
    /// Draws required by the selected scheme were not supplied.
    MissingDraws {
        /// Draw name ("z" or "u").
        name: &'static str,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidPathCount(count) => {
                write!(f, "Invalid path count {}: must be in range [1, {}]", count, MAX_PATHS)
            }
            Self::InvalidStepCount(count) => {
                write!(f, "Invalid step count {}: must be in range [1, {}]", count, MAX_STEPS)
            }
            Self::InvalidParameter { name, value } => {
                write!(f, "Invalid parameter '{}': {}", name, value)
            }
            Self::DrawShapeMismatch {
                name,
                expected,
                actual,
            } => write!(
                f,
                "{} has wrong shape: expected {}x{}, got {}x{}",
                name, expected.0, expected.1, actual.0, actual.1
            ),
            Self::MissingDraws { name } => {
                write!(f, "{} is required with brownian_bridge and must match z", name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ConfigError> for PricingError {
    fn from(err: ConfigError) -> Self {
        PricingError::Configuration(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::InvalidPathCount(0);
        assert!(err.to_string().contains("Invalid path count 0"));

        let err = ConfigError::InvalidStepCount(20_000);
        assert!(err.to_string().contains("Invalid step count 20000"));

        let err = ConfigError::DrawShapeMismatch {
            name: "z",
            expected: (100, 12),
            actual: (100, 11),
        };
        assert_eq!(err.to_string(), "z has wrong shape: expected 100x12, got 100x11");
    }

    #[test]
    fn test_converts_to_configuration_error() {
        let err: PricingError = ConfigError::MissingDraws { name: "u" }.into();
        assert!(err.is_configuration());
    }
}
