//! Instrument type and pricing method keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::InstrumentError;

/// The six supported instrument families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InstrumentType {
    /// European option
    Vanilla,
    /// American option
    American,
    /// Cash-or-nothing digital
    Digital,
    /// Knock-out barrier option
    Barrier,
    /// Average-price Asian option
    Asian,
    /// Forward contract
    Forward,
}

impl InstrumentType {
    /// Every instrument type, in catalog order.
    pub const ALL: [InstrumentType; 6] = [
        InstrumentType::Vanilla,
        InstrumentType::American,
        InstrumentType::Digital,
        InstrumentType::Barrier,
        InstrumentType::Asian,
        InstrumentType::Forward,
    ];

    /// Wire key.
    pub fn as_str(&self) -> &'static str {
        match self {
            InstrumentType::Vanilla => "vanilla",
            InstrumentType::American => "american",
            InstrumentType::Digital => "digital",
            InstrumentType::Barrier => "barrier",
            InstrumentType::Asian => "asian",
            InstrumentType::Forward => "forward",
        }
    }

    /// Methods that can price this instrument type.
    pub fn methods(&self) -> &'static [Method] {
        match self {
            InstrumentType::Vanilla => &[Method::BlackScholes, Method::BinomialCrr],
            InstrumentType::American => &[Method::BinomialCrr],
            InstrumentType::Digital => &[Method::BlackScholes],
            InstrumentType::Barrier => &[Method::McDiscrete, Method::McBridge],
            InstrumentType::Asian => &[Method::GeometricClosedForm, Method::ArithmeticMc],
            InstrumentType::Forward => &[Method::DiscountedForward],
        }
    }

    /// True if `method` is valid for this instrument type.
    #[inline]
    pub fn supports(&self, method: Method) -> bool {
        self.methods().contains(&method)
    }

    /// True for types whose terminal value depends on the whole path.
    #[inline]
    pub fn is_path_dependent(&self) -> bool {
        matches!(self, InstrumentType::Barrier | InstrumentType::Asian)
    }
}

impl FromStr for InstrumentType {
    type Err = InstrumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase();
        InstrumentType::ALL
            .into_iter()
            .find(|t| t.as_str() == key)
            .ok_or_else(|| InstrumentError::UnknownInstrumentType {
                instrument_type: s.to_string(),
            })
    }
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Numerical technique keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Method {
    /// Closed-form Black-Scholes
    BlackScholes,
    /// Cox-Ross-Rubinstein binomial lattice
    BinomialCrr,
    /// Monte Carlo, discrete barrier monitoring
    McDiscrete,
    /// Monte Carlo with Brownian-bridge crossing correction
    McBridge,
    /// Continuous geometric-average closed form
    GeometricClosedForm,
    /// Arithmetic-average Monte Carlo
    ArithmeticMc,
    /// Discounted forward value
    DiscountedForward,
}

impl Method {
    /// Every method key.
    pub const ALL: [Method; 7] = [
        Method::BlackScholes,
        Method::BinomialCrr,
        Method::McDiscrete,
        Method::McBridge,
        Method::GeometricClosedForm,
        Method::ArithmeticMc,
        Method::DiscountedForward,
    ];

    /// Wire key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::BlackScholes => "black_scholes",
            Method::BinomialCrr => "binomial_crr",
            Method::McDiscrete => "mc_discrete",
            Method::McBridge => "mc_bridge",
            Method::GeometricClosedForm => "geometric_closed_form",
            Method::ArithmeticMc => "arithmetic_mc",
            Method::DiscountedForward => "discounted_forward",
        }
    }

    /// True for simulation-based methods.
    #[inline]
    pub fn is_monte_carlo(&self) -> bool {
        matches!(self, Method::McDiscrete | Method::McBridge | Method::ArithmeticMc)
    }

    /// Parses a method key for a given instrument type.
    pub fn parse_for(instrument_type: InstrumentType, method: &str) -> Result<Self, InstrumentError> {
        let key = method.trim().to_lowercase();
        instrument_type
            .methods()
            .iter()
            .copied()
            .find(|m| m.as_str() == key)
            .ok_or_else(|| InstrumentError::UnsupportedMethod {
                instrument_type: instrument_type.as_str().to_string(),
                method: method.to_string(),
            })
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
