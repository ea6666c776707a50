//! Validated product definitions.
//!
//! [`Product`] is the typed form of a leg: one variant per instrument type,
//! with the pricing method and its numerical settings embedded, so that an
//! unsupported `(instrument_type, method)` pair cannot be represented.

use pricer_core::types::{BarrierDirection, OptionType};
use serde::Serialize;

use super::error::InstrumentError;
use super::kind::{InstrumentType, Method};
use super::params::LegParams;

/// Upper bound on Monte Carlo paths.
pub const MAX_PATHS: usize = 10_000_000;

/// Upper bound on lattice steps, time steps and fixings.
pub const MAX_STEPS: usize = 10_000;

/// Default lattice steps for a European option priced on a tree.
pub const DEFAULT_VANILLA_STEPS: usize = 200;
/// Default lattice steps for an American option.
pub const DEFAULT_AMERICAN_STEPS: usize = 300;
/// Default digital cash payout.
pub const DEFAULT_DIGITAL_PAYOUT: f64 = 1.0;
/// Default barrier Monte Carlo settings.
pub const DEFAULT_BARRIER_MC: McParams = McParams {
    paths: 20_000,
    steps: 96,
    seed: 7,
};
/// Default arithmetic Asian fixings.
pub const DEFAULT_ASIAN_FIXINGS: usize = 52;
/// Default arithmetic Asian paths.
pub const DEFAULT_ASIAN_PATHS: usize = 30_000;
/// Default arithmetic Asian seed.
pub const DEFAULT_ASIAN_SEED: u64 = 11;

/// Option terms shared by every option-style product.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OptionContract {
    /// Call or put
    pub option_type: OptionType,
    /// Strike (> 0)
    pub strike: f64,
    /// Years to expiry; values <= 0 mean at/after expiry
    pub time_to_expiry: f64,
}

impl OptionContract {
    /// Creates validated option terms.
    ///
    /// # Errors
    /// `InvalidParameter` if strike is not finite and positive, or expiry
    /// is not finite.
    pub fn new(option_type: OptionType, strike: f64, time_to_expiry: f64) -> Result<Self, InstrumentError> {
        check_strike(strike)?;
        check_expiry(time_to_expiry)?;
        Ok(Self {
            option_type,
            strike,
            time_to_expiry,
        })
    }

    /// Terminal intrinsic value at `spot`.
    #[inline]
    pub fn intrinsic(&self, spot: f64) -> f64 {
        self.option_type.intrinsic(spot, self.strike)
    }

    fn from_params(params: &LegParams) -> Result<Self, InstrumentError> {
        let option_type = params
            .key_or("option_type", OptionType::default().as_str())?
            .parse::<OptionType>()
            .map_err(|_| InstrumentError::invalid("option_type", "must be 'call' or 'put'"))?;
        Self::new(
            option_type,
            params.require_f64("strike")?,
            params.require_f64("time_to_expiry")?,
        )
    }
}

/// European option pricing technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum VanillaMethod {
    /// Closed-form Black-Scholes with analytic Greeks
    BlackScholes,
    /// CRR lattice without early exercise
    BinomialCrr {
        /// Tree steps
        steps: usize,
    },
}

/// Barrier monitoring scheme for the Monte Carlo knock-out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BarrierMonitoring {
    /// Knock-out only observed at simulation dates
    Discrete,
    /// Discrete monitoring plus a per-step Brownian-bridge crossing test
    BrownianBridge,
}

/// Monte Carlo path settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct McParams {
    /// Number of simulated paths
    pub paths: usize,
    /// Time steps per path
    pub steps: usize,
    /// RNG seed
    pub seed: u64,
}

/// Asian option pricing technique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AsianMethod {
    /// Continuous geometric average, closed form
    GeometricClosedForm,
    /// Discrete arithmetic average, Monte Carlo
    ArithmeticMc {
        /// Equally spaced observations in (0, T]
        fixings: usize,
        /// Number of simulated paths
        paths: usize,
        /// RNG seed
        seed: u64,
    },
}

/// A fully validated product with its pricing method.
///
/// # Examples
/// ```
/// use pricer_models::instruments::{InstrumentType, LegParams, Method, Product};
/// use serde_json::json;
///
/// let params = LegParams::from_value(json!({
///     "option_type": "put", "strike": 100, "time_to_expiry": 1.0, "steps": "150"
/// })).unwrap();
/// let product = Product::from_params(InstrumentType::American, Method::BinomialCrr, &params).unwrap();
/// assert!(matches!(product, Product::American { steps: 150, .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "instrument_type", rename_all = "snake_case")]
pub enum Product {
    /// European option
    Vanilla {
        /// Option terms
        option: OptionContract,
        /// Pricing technique
        method: VanillaMethod,
    },
    /// American option on a CRR lattice
    American {
        /// Option terms
        option: OptionContract,
        /// Tree steps
        steps: usize,
    },
    /// Cash-or-nothing digital
    Digital {
        /// Option terms
        option: OptionContract,
        /// Cash paid in the money (> 0)
        payout: f64,
    },
    /// Knock-out barrier option, Monte Carlo
    Barrier {
        /// Option terms
        option: OptionContract,
        /// Barrier level (> 0)
        barrier_level: f64,
        /// Barrier side
        direction: BarrierDirection,
        /// Monitoring scheme
        monitoring: BarrierMonitoring,
        /// Path settings
        mc: McParams,
    },
    /// Fixed-strike average-price option
    Asian {
        /// Option terms
        option: OptionContract,
        /// Pricing technique
        method: AsianMethod,
    },
    /// Forward contract
    Forward {
        /// Delivery price (> 0)
        strike: f64,
        /// Years to delivery
        time_to_expiry: f64,
    },
}

impl Product {
    /// Builds a product from loosely typed parameters.
    ///
    /// Applies defaults for optional fields (option type `call`, lattice
    /// steps, Monte Carlo settings, digital payout) and validates ranges.
    ///
    /// # Errors
    /// - `UnsupportedMethod` if `method` does not apply to `instrument_type`
    /// - `InvalidParameter` for missing or malformed fields
    /// - `OutOfRange` for counts outside their limits
    pub fn from_params(
        instrument_type: InstrumentType,
        method: Method,
        params: &LegParams,
    ) -> Result<Self, InstrumentError> {
        if !instrument_type.supports(method) {
            return Err(InstrumentError::UnsupportedMethod {
                instrument_type: instrument_type.as_str().to_string(),
                method: method.as_str().to_string(),
            });
        }

        let product = match instrument_type {
            InstrumentType::Forward => {
                let strike = params.require_f64("strike")?;
                let time_to_expiry = params.require_f64("time_to_expiry")?;
                check_strike(strike)?;
                check_expiry(time_to_expiry)?;
                Product::Forward { strike, time_to_expiry }
            }
            InstrumentType::Vanilla => {
                let option = OptionContract::from_params(params)?;
                let method = match method {
                    Method::BinomialCrr => VanillaMethod::BinomialCrr {
                        steps: params.count_or("steps", DEFAULT_VANILLA_STEPS, 1, MAX_STEPS)?,
                    },
                    _ => VanillaMethod::BlackScholes,
                };
                Product::Vanilla { option, method }
            }
            InstrumentType::American => Product::American {
                option: OptionContract::from_params(params)?,
                steps: params.count_or("steps", DEFAULT_AMERICAN_STEPS, 1, MAX_STEPS)?,
            },
            InstrumentType::Digital => {
                let option = OptionContract::from_params(params)?;
                let payout = params.f64_or("payout", DEFAULT_DIGITAL_PAYOUT)?;
                if payout <= 0.0 {
                    return Err(InstrumentError::invalid("payout", format!("must be > 0 (got {})", payout)));
                }
                Product::Digital { option, payout }
            }
            InstrumentType::Barrier => {
                let option = OptionContract::from_params(params)?;
                let barrier_level = params.require_f64("barrier_level")?;
                if barrier_level <= 0.0 {
                    return Err(InstrumentError::invalid(
                        "barrier_level",
                        format!("must be > 0 (got {})", barrier_level),
                    ));
                }
                let direction = params
                    .key_or("barrier_direction", BarrierDirection::default().as_str())?
                    .parse::<BarrierDirection>()
                    .map_err(|_| InstrumentError::invalid("barrier_direction", "must be 'up' or 'down'"))?;
                let monitoring = if method == Method::McBridge {
                    BarrierMonitoring::BrownianBridge
                } else {
                    BarrierMonitoring::Discrete
                };
                let mc = McParams {
                    paths: params.count_or("paths", DEFAULT_BARRIER_MC.paths, 1, MAX_PATHS)?,
                    steps: params.count_or("steps", DEFAULT_BARRIER_MC.steps, 1, MAX_STEPS)?,
                    seed: params.seed_or("seed", DEFAULT_BARRIER_MC.seed)?,
                };
                Product::Barrier {
                    option,
                    barrier_level,
                    direction,
                    monitoring,
                    mc,
                }
            }
            InstrumentType::Asian => {
                let option = OptionContract::from_params(params)?;
                let method = match method {
                    Method::ArithmeticMc => AsianMethod::ArithmeticMc {
                        fixings: params.count_or("fixings", DEFAULT_ASIAN_FIXINGS, 1, MAX_STEPS)?,
                        paths: params.count_or("paths", DEFAULT_ASIAN_PATHS, 1, MAX_PATHS)?,
                        seed: params.seed_or("seed", DEFAULT_ASIAN_SEED)?,
                    },
                    _ => AsianMethod::GeometricClosedForm,
                };
                Product::Asian { option, method }
            }
        };
        Ok(product)
    }

    /// Parses string keys and builds the product.
    pub fn parse(instrument_type: &str, method: &str, params: &LegParams) -> Result<Self, InstrumentError> {
        let instrument_type = instrument_type.parse::<InstrumentType>()?;
        let method = Method::parse_for(instrument_type, method)?;
        Self::from_params(instrument_type, method, params)
    }

    /// Instrument family.
    pub fn instrument_type(&self) -> InstrumentType {
        match self {
            Product::Vanilla { .. } => InstrumentType::Vanilla,
            Product::American { .. } => InstrumentType::American,
            Product::Digital { .. } => InstrumentType::Digital,
            Product::Barrier { .. } => InstrumentType::Barrier,
            Product::Asian { .. } => InstrumentType::Asian,
            Product::Forward { .. } => InstrumentType::Forward,
        }
    }

    /// Pricing method.
    pub fn method(&self) -> Method {
        match self {
            Product::Vanilla {
                method: VanillaMethod::BlackScholes,
                ..
            } => Method::BlackScholes,
            Product::Vanilla {
                method: VanillaMethod::BinomialCrr { .. },
                ..
            } => Method::BinomialCrr,
            Product::American { .. } => Method::BinomialCrr,
            Product::Digital { .. } => Method::BlackScholes,
            Product::Barrier {
                monitoring: BarrierMonitoring::Discrete,
                ..
            } => Method::McDiscrete,
            Product::Barrier {
                monitoring: BarrierMonitoring::BrownianBridge,
                ..
            } => Method::McBridge,
            Product::Asian {
                method: AsianMethod::GeometricClosedForm,
                ..
            } => Method::GeometricClosedForm,
            Product::Asian {
                method: AsianMethod::ArithmeticMc { .. },
                ..
            } => Method::ArithmeticMc,
            Product::Forward { .. } => Method::DiscountedForward,
        }
    }

    /// Option terms, `None` for forwards.
    pub fn option(&self) -> Option<&OptionContract> {
        match self {
            Product::Vanilla { option, .. }
            | Product::American { option, .. }
            | Product::Digital { option, .. }
            | Product::Barrier { option, .. }
            | Product::Asian { option, .. } => Some(option),
            Product::Forward { .. } => None,
        }
    }

    /// Call/put flavour, `None` for forwards.
    pub fn option_type(&self) -> Option<OptionType> {
        self.option().map(|o| o.option_type)
    }

    /// Years to expiry.
    pub fn time_to_expiry(&self) -> f64 {
        match self {
            Product::Forward { time_to_expiry, .. } => *time_to_expiry,
            _ => self.option().map_or(0.0, |o| o.time_to_expiry),
        }
    }

    /// Copy of the product with a different time to expiry (theta bumps).
    pub fn with_time_to_expiry(&self, time_to_expiry: f64) -> Self {
        let mut product = self.clone();
        match &mut product {
            Product::Vanilla { option, .. }
            | Product::American { option, .. }
            | Product::Digital { option, .. }
            | Product::Barrier { option, .. }
            | Product::Asian { option, .. } => option.time_to_expiry = time_to_expiry,
            Product::Forward {
                time_to_expiry: t, ..
            } => *t = time_to_expiry,
        }
        product
    }

    /// True if the product is priced by simulation.
    #[inline]
    pub fn is_monte_carlo(&self) -> bool {
        self.method().is_monte_carlo()
    }

    /// Terminal payoff per unit at `spot`, or `None` when the payoff cannot
    /// be read off a single terminal spot (barrier, Asian).
    ///
    /// American options are valued at intrinsic; digitals pay strictly in
    /// the money.
    pub fn terminal_payoff(&self, spot: f64) -> Option<f64> {
        match self {
            Product::Vanilla { option, .. } | Product::American { option, .. } => Some(option.intrinsic(spot)),
            Product::Digital { option, payout } => {
                let in_the_money = match option.option_type {
                    OptionType::Call => spot > option.strike,
                    OptionType::Put => spot < option.strike,
                };
                Some(if in_the_money { *payout } else { 0.0 })
            }
            Product::Forward { strike, .. } => Some(spot - strike),
            Product::Barrier { .. } | Product::Asian { .. } => None,
        }
    }
}

fn check_strike(strike: f64) -> Result<(), InstrumentError> {
    if strike.is_finite() && strike > 0.0 {
        Ok(())
    } else {
        Err(InstrumentError::invalid("strike", format!("must be > 0 (got {})", strike)))
    }
}

fn check_expiry(time_to_expiry: f64) -> Result<(), InstrumentError> {
    if time_to_expiry.is_finite() {
        Ok(())
    } else {
        Err(InstrumentError::invalid("time_to_expiry", "must be finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(v: serde_json::Value) -> LegParams {
        LegParams::from_value(v).unwrap()
    }

    #[test]
    fn test_defaults_applied() {
        let p = params(json!({"strike": 100, "time_to_expiry": 1}));

        let vanilla = Product::parse("vanilla", "binomial_crr", &p).unwrap();
        assert_eq!(
            vanilla,
            Product::Vanilla {
                option: OptionContract::new(OptionType::Call, 100.0, 1.0).unwrap(),
                method: VanillaMethod::BinomialCrr { steps: 200 },
            }
        );

        let american = Product::parse("american", "binomial_crr", &p).unwrap();
        assert!(matches!(american, Product::American { steps: 300, .. }));

        let digital = Product::parse("digital", "black_scholes", &p).unwrap();
        assert!(matches!(digital, Product::Digital { payout, .. } if payout == 1.0));

        let asian = Product::parse("asian", "arithmetic_mc", &p).unwrap();
        assert!(matches!(
            asian,
            Product::Asian {
                method: AsianMethod::ArithmeticMc {
                    fixings: 52,
                    paths: 30_000,
                    seed: 11
                },
                ..
            }
        ));
    }

    #[test]
    fn test_barrier_parsing() {
        let p = params(json!({
            "option_type": "PUT", "strike": 100, "time_to_expiry": 0.5,
            "barrier_level": "80", "barrier_direction": " Down "
        }));
        let product = Product::parse("barrier", "mc_bridge", &p).unwrap();
        match product {
            Product::Barrier {
                option,
                barrier_level,
                direction,
                monitoring,
                mc,
            } => {
                assert_eq!(option.option_type, OptionType::Put);
                assert_eq!(barrier_level, 80.0);
                assert_eq!(direction, BarrierDirection::Down);
                assert_eq!(monitoring, BarrierMonitoring::BrownianBridge);
                assert_eq!(mc, DEFAULT_BARRIER_MC);
            }
            other => panic!("unexpected product {:?}", other),
        }
    }

    #[test]
    fn test_validation_errors() {
        let base = json!({"strike": 100, "time_to_expiry": 1});
        assert!(matches!(
            Product::parse("vanilla", "mc_bridge", &params(base.clone())),
            Err(InstrumentError::UnsupportedMethod { .. })
        ));
        assert!(Product::parse("vanilla", "black_scholes", &params(json!({"strike": -1, "time_to_expiry": 1}))).is_err());
        assert!(Product::parse("vanilla", "black_scholes", &params(json!({"time_to_expiry": 1}))).is_err());
        assert!(Product::parse(
            "vanilla",
            "black_scholes",
            &params(json!({"strike": 100, "time_to_expiry": 1, "option_type": "straddle"}))
        )
        .is_err());
        assert!(matches!(
            Product::parse(
                "american",
                "binomial_crr",
                &params(json!({"strike": 100, "time_to_expiry": 1, "steps": 0}))
            ),
            Err(InstrumentError::OutOfRange { .. })
        ));
        assert!(Product::parse(
            "barrier",
            "mc_discrete",
            &params(json!({"strike": 100, "time_to_expiry": 1, "barrier_level": 0}))
        )
        .is_err());
        assert!(Product::parse(
            "barrier",
            "mc_discrete",
            &params(json!({"strike": 100, "time_to_expiry": 1, "barrier_level": 120, "barrier_direction": "sideways"}))
        )
        .is_err());
        assert!(Product::parse(
            "digital",
            "black_scholes",
            &params(json!({"strike": 100, "time_to_expiry": 1, "payout": 0}))
        )
        .is_err());
    }

    #[test]
    fn test_method_round_trip() {
        let p = params(json!({"strike": 100, "time_to_expiry": 1, "barrier_level": 150}));
        for instrument_type in InstrumentType::ALL {
            for &method in instrument_type.methods() {
                let product = Product::from_params(instrument_type, method, &p).unwrap();
                assert_eq!(product.instrument_type(), instrument_type);
                assert_eq!(product.method(), method);
            }
        }
    }

    #[test]
    fn test_with_time_to_expiry() {
        let p = params(json!({"strike": 100, "time_to_expiry": 1}));
        let fwd = Product::parse("forward", "discounted_forward", &p).unwrap();
        assert_eq!(fwd.with_time_to_expiry(0.25).time_to_expiry(), 0.25);
        assert_eq!(fwd.time_to_expiry(), 1.0);

        let digital = Product::parse("digital", "black_scholes", &p).unwrap();
        assert_eq!(digital.with_time_to_expiry(-0.1).time_to_expiry(), -0.1);
    }

    #[test]
    fn test_terminal_payoffs() {
        let p = params(json!({"strike": 100, "time_to_expiry": 1, "payout": 3, "barrier_level": 150}));
        let vanilla = Product::parse("vanilla", "black_scholes", &p).unwrap();
        assert_eq!(vanilla.terminal_payoff(110.0), Some(10.0));

        let digital = Product::parse("digital", "black_scholes", &p).unwrap();
        assert_eq!(digital.terminal_payoff(100.0), Some(0.0));
        assert_eq!(digital.terminal_payoff(100.5), Some(3.0));

        let forward = Product::parse("forward", "discounted_forward", &p).unwrap();
        assert_eq!(forward.terminal_payoff(90.0), Some(-10.0));

        let barrier = Product::parse("barrier", "mc_discrete", &p).unwrap();
        assert_eq!(barrier.terminal_payoff(110.0), None);
        assert!(barrier.is_monte_carlo());
    }
}
