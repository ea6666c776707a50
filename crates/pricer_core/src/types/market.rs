//! Market snapshot and option flavour types.
//!
//! [`MarketState`] is the immutable snapshot every pricer receives. Bumped
//! copies (for Greeks or scenario grids) are produced with the `with_*`
//! methods; a snapshot is never modified in place.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{ensure_finite, ensure_positive, PricingError};

/// Immutable market inputs for one pricing call.
///
/// - `spot` is strictly positive
/// - `rate` and `dividend_yield` are continuously compounded annual rates (signed)
/// - `vol` is annualised; it is validated by the pricers that need it, since
///   it is irrelevant at or after expiry
///
/// # Examples
/// ```
/// use pricer_core::types::MarketState;
///
/// let market = MarketState::new(100.0, 0.05, 0.0, 0.2).unwrap();
/// let bumped = market.with_spot(101.0).unwrap();
/// assert_eq!(market.spot(), 100.0);
/// assert_eq!(bumped.spot(), 101.0);
///
/// assert!(MarketState::new(0.0, 0.05, 0.0, 0.2).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "MarketInputs")]
pub struct MarketState {
    spot: f64,
    rate: f64,
    dividend_yield: f64,
    vol: f64,
}

/// Unvalidated wire form of [`MarketState`].
#[derive(Debug, Clone, Copy, Deserialize)]
struct MarketInputs {
    spot: f64,
    rate: f64,
    #[serde(default)]
    dividend_yield: f64,
    vol: f64,
}

impl TryFrom<MarketInputs> for MarketState {
    type Error = PricingError;

    fn try_from(raw: MarketInputs) -> Result<Self, Self::Error> {
        MarketState::new(raw.spot, raw.rate, raw.dividend_yield, raw.vol)
    }
}

impl MarketState {
    /// Creates a validated market snapshot.
    ///
    /// # Errors
    /// - `PricingError::Domain` if spot <= 0 or any input is not finite
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, vol: f64) -> Result<Self, PricingError> {
        ensure_positive("spot", spot)?;
        ensure_finite("rate", rate)?;
        ensure_finite("dividend_yield", dividend_yield)?;
        ensure_finite("vol", vol)?;
        Ok(Self {
            spot,
            rate,
            dividend_yield,
            vol,
        })
    }

    /// Returns the spot price.
    #[inline]
    pub fn spot(&self) -> f64 {
        self.spot
    }

    /// Returns the continuously compounded risk-free rate.
    #[inline]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the continuously compounded dividend yield.
    #[inline]
    pub fn dividend_yield(&self) -> f64 {
        self.dividend_yield
    }

    /// Returns the annualised volatility.
    #[inline]
    pub fn vol(&self) -> f64 {
        self.vol
    }

    /// Returns a copy with a different spot.
    pub fn with_spot(&self, spot: f64) -> Result<Self, PricingError> {
        Self::new(spot, self.rate, self.dividend_yield, self.vol)
    }

    /// Returns a copy with a different rate.
    pub fn with_rate(&self, rate: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, rate, self.dividend_yield, self.vol)
    }

    /// Returns a copy with a different volatility.
    pub fn with_vol(&self, vol: f64) -> Result<Self, PricingError> {
        Self::new(self.spot, self.rate, self.dividend_yield, vol)
    }

    /// Fails with a `Domain` error unless vol is strictly positive.
    #[inline]
    pub fn require_vol(&self) -> Result<f64, PricingError> {
        ensure_positive("vol", self.vol)?;
        Ok(self.vol)
    }
}

/// Call or put.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    /// Right to buy.
    #[default]
    Call,
    /// Right to sell.
    Put,
}

impl OptionType {
    /// Returns true for calls.
    #[inline]
    pub fn is_call(&self) -> bool {
        matches!(self, OptionType::Call)
    }

    /// Terminal payoff `max(S - K, 0)` or `max(K - S, 0)`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        match self {
            OptionType::Call => (spot - strike).max(0.0),
            OptionType::Put => (strike - spot).max(0.0),
        }
    }

    /// Returns the wire key (`"call"` / `"put"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            OptionType::Call => "call",
            OptionType::Put => "put",
        }
    }
}

impl FromStr for OptionType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(PricingError::domain(format!(
                "option_type must be 'call' or 'put' (got '{}')",
                s
            ))),
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Side of a knock-out barrier relative to spot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarrierDirection {
    /// Barrier above spot; knocked out when spot rises to it.
    #[default]
    Up,
    /// Barrier below spot; knocked out when spot falls to it.
    Down,
}

impl BarrierDirection {
    /// Returns true if `spot` is at or beyond `barrier` on this side.
    #[inline]
    pub fn is_breached(&self, spot: f64, barrier: f64) -> bool {
        match self {
            BarrierDirection::Up => spot >= barrier,
            BarrierDirection::Down => spot <= barrier,
        }
    }

    /// Returns the wire key (`"up"` / `"down"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            BarrierDirection::Up => "up",
            BarrierDirection::Down => "down",
        }
    }
}

impl FromStr for BarrierDirection {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "up" => Ok(BarrierDirection::Up),
            "down" => Ok(BarrierDirection::Down),
            _ => Err(PricingError::domain(format!(
                "barrier_direction must be 'up' or 'down' (got '{}')",
                s
            ))),
        }
    }
}

impl fmt::Display for BarrierDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
