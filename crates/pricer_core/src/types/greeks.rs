//! First- and second-order sensitivities.

use std::ops::{Add, AddAssign, Sub};

use serde::{Deserialize, Serialize};

/// Option Greeks per unit of instrument.
///
/// Conventions:
/// - `delta`, `gamma`: per 1.0 unit of spot
/// - `vega`: per 1.0 absolute change in vol (not per vol point of 1%)
/// - `rho`: per 1.0 absolute change in rate
/// - `theta`: per year of calendar time (not per day)
///
/// # Examples
/// ```
/// use pricer_core::types::Greeks;
///
/// let g = Greeks::new(0.5, 0.02, 30.0, -5.0, 40.0);
/// let short_two = g.scale(-2.0);
/// assert_eq!(short_two.delta, -1.0);
/// assert_eq!((g + short_two).vega, -30.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ
    pub vega: f64,
    /// Calendar-time decay, per year.
    pub theta: f64,
    /// ∂V/∂r
    pub rho: f64,
}

impl Greeks {
    /// Creates Greeks from components.
    pub fn new(delta: f64, gamma: f64, vega: f64, theta: f64, rho: f64) -> Self {
        Self {
            delta,
            gamma,
            vega,
            theta,
            rho,
        }
    }

    /// All sensitivities zero.
    #[inline]
    pub fn zero() -> Self {
        Self::default()
    }

    /// Multiplies every component by `factor` (e.g. a signed quantity).
    #[inline]
    pub fn scale(&self, factor: f64) -> Self {
        Self {
            delta: self.delta * factor,
            gamma: self.gamma * factor,
            vega: self.vega * factor,
            theta: self.theta * factor,
            rho: self.rho * factor,
        }
    }

    /// Returns true if every component is finite.
    pub fn is_finite(&self) -> bool {
        self.delta.is_finite()
            && self.gamma.is_finite()
            && self.vega.is_finite()
            && self.theta.is_finite()
            && self.rho.is_finite()
    }
}

impl Add for Greeks {
    type Output = Greeks;

    fn add(self, rhs: Greeks) -> Greeks {
        Greeks {
            delta: self.delta + rhs.delta,
            gamma: self.gamma + rhs.gamma,
            vega: self.vega + rhs.vega,
            theta: self.theta + rhs.theta,
            rho: self.rho + rhs.rho,
        }
    }
}

impl AddAssign for Greeks {
    fn add_assign(&mut self, rhs: Greeks) {
        *self = *self + rhs;
    }
}

impl Sub for Greeks {
    type Output = Greeks;

    fn sub(self, rhs: Greeks) -> Greeks {
        self + rhs.scale(-1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero() {
        let z = Greeks::zero();
        assert_eq!(z, Greeks::new(0.0, 0.0, 0.0, 0.0, 0.0));
    }

    #[test]
    fn test_add_and_sub() {
        let a = Greeks::new(1.0, 2.0, 3.0, 4.0, 5.0);
        let b = Greeks::new(0.5, 0.5, 0.5, 0.5, 0.5);
        assert_eq!(a + b, Greeks::new(1.5, 2.5, 3.5, 4.5, 5.5));
        assert_eq!(a - b, Greeks::new(0.5, 1.5, 2.5, 3.5, 4.5));

        let mut acc = Greeks::zero();
        acc += a;
        acc += b;
        assert_eq!(acc, a + b);
    }

    #[test]
    fn test_scale_by_short_quantity() {
        let g = Greeks::new(0.6, 0.02, 37.5, -6.4, 53.2).scale(-3.0);
        assert!((g.delta + 1.8).abs() < 1e-12);
        assert!((g.theta - 19.2).abs() < 1e-12);
    }

    #[test]
    fn test_is_finite() {
        assert!(Greeks::zero().is_finite());
        assert!(!Greeks::new(f64::NAN, 0.0, 0.0, 0.0, 0.0).is_finite());
    }
}
