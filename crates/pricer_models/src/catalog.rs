//! Static instrument and method catalog.
//!
//! Describes every supported `(instrument_type, method)` pair with labels,
//! methodology notes and input defaults, for front ends that build forms
//! from it. No market data lives here.

use serde::Serialize;
use serde_json::Value;

use crate::instruments::{
    InstrumentType, LegParams, Method, DEFAULT_AMERICAN_STEPS, DEFAULT_ASIAN_FIXINGS, DEFAULT_ASIAN_PATHS,
    DEFAULT_ASIAN_SEED, DEFAULT_BARRIER_MC, DEFAULT_DIGITAL_PAYOUT, DEFAULT_VANILLA_STEPS,
};

/// Catalog schema version.
pub const CATALOG_VERSION: &str = "0.5";

/// Input widget kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    /// Numeric input
    Number,
    /// Choice among fixed options
    Select,
}

/// One option of a select input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectOption {
    /// Wire value
    pub value: &'static str,
    /// Display label
    pub label: &'static str,
}

/// Description of one input parameter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParamSpec {
    /// Parameter key
    pub key: &'static str,
    /// Display label
    pub label: &'static str,
    /// Widget kind
    #[serde(rename = "type")]
    pub kind: ParamKind,
    /// Default value
    pub default: Value,
    /// Lower bound hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Increment hint
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<f64>,
    /// Choices for select inputs
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<SelectOption>,
}

impl ParamSpec {
    fn number(key: &'static str, label: &'static str, default: impl Into<Value>, min: Option<f64>, step: f64) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Number,
            default: default.into(),
            min,
            step: Some(step),
            options: Vec::new(),
        }
    }

    fn select(key: &'static str, label: &'static str, default: &'static str, options: Vec<SelectOption>) -> Self {
        Self {
            key,
            label,
            kind: ParamKind::Select,
            default: Value::from(default),
            min: None,
            step: None,
            options,
        }
    }
}

/// One pricing method of an instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MethodSpec {
    /// Method key
    pub key: Method,
    /// Display label
    pub label: &'static str,
    /// Methodology note
    pub note: &'static str,
    /// Method-specific inputs
    pub extra_params: Vec<ParamSpec>,
}

/// One instrument type with its base inputs and methods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InstrumentSpec {
    /// Instrument type key
    pub key: InstrumentType,
    /// Display label
    pub label: &'static str,
    /// Inputs common to every method
    pub base_params: Vec<ParamSpec>,
    /// Supported methods
    pub methods: Vec<MethodSpec>,
}

impl InstrumentSpec {
    /// Looks up a method entry.
    pub fn method(&self, method: Method) -> Option<&MethodSpec> {
        self.methods.iter().find(|m| m.key == method)
    }

    /// Parameter map filled with the catalog defaults for `method`.
    pub fn default_params(&self, method: &MethodSpec) -> LegParams {
        let mut params = LegParams::new();
        for spec in self.base_params.iter().chain(method.extra_params.iter()) {
            params.insert(spec.key, spec.default.clone());
        }
        params
    }
}

/// The full catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Catalog {
    /// Schema version
    pub version: &'static str,
    /// Market inputs
    pub market_params: Vec<ParamSpec>,
    /// Instrument entries
    pub instruments: Vec<InstrumentSpec>,
}

impl Catalog {
    /// Looks up an instrument entry.
    pub fn instrument(&self, instrument_type: InstrumentType) -> Option<&InstrumentSpec> {
        self.instruments.iter().find(|i| i.key == instrument_type)
    }

    /// Every `(instrument_type, method)` pair in catalog order.
    pub fn pairs(&self) -> Vec<(InstrumentType, Method)> {
        self.instruments
            .iter()
            .flat_map(|i| i.methods.iter().map(move |m| (i.key, m.key)))
            .collect()
    }
}

fn option_type_param(default: &'static str) -> ParamSpec {
    ParamSpec::select(
        "option_type",
        "Type",
        default,
        vec![
            SelectOption {
                value: "call",
                label: "Call",
            },
            SelectOption {
                value: "put",
                label: "Put",
            },
        ],
    )
}

fn strike_param(label: &'static str) -> ParamSpec {
    ParamSpec::number("strike", label, 100.0, Some(0.000001), 0.01)
}

fn expiry_param() -> ParamSpec {
    ParamSpec::number("time_to_expiry", "T (years)", 1.0, Some(0.000001), 0.0001)
}

fn steps_param(label: &'static str, default: usize) -> ParamSpec {
    ParamSpec::number("steps", label, default as u64, Some(10.0), 1.0)
}

fn paths_param(default: usize) -> ParamSpec {
    ParamSpec::number("paths", "Paths", default as u64, Some(1000.0), 500.0)
}

fn seed_param(default: u64) -> ParamSpec {
    ParamSpec::number("seed", "Seed", default, Some(0.0), 1.0)
}

fn barrier_mc_params() -> Vec<ParamSpec> {
    vec![
        paths_param(DEFAULT_BARRIER_MC.paths),
        steps_param("Steps", DEFAULT_BARRIER_MC.steps),
        seed_param(DEFAULT_BARRIER_MC.seed),
    ]
}

/// Builds the catalog.
///
/// # Examples
/// ```
/// use pricer_models::catalog::catalog;
/// use pricer_models::instruments::InstrumentType;
///
/// let cat = catalog();
/// assert_eq!(cat.instruments.len(), 6);
/// assert_eq!(cat.instrument(InstrumentType::Barrier).unwrap().methods.len(), 2);
/// ```
pub fn catalog() -> Catalog {
    Catalog {
        version: CATALOG_VERSION,
        market_params: vec![
            ParamSpec::number("spot", "Spot", 100.0, Some(0.000001), 0.01),
            ParamSpec::number("rate", "Rate (cc)", 0.05, None, 0.0001),
            ParamSpec::number("dividend_yield", "Dividend yield (cc)", 0.0, None, 0.0001),
            ParamSpec::number("vol", "Vol", 0.2, Some(0.000001), 0.0001),
        ],
        instruments: vec![
            InstrumentSpec {
                key: InstrumentType::Vanilla,
                label: "Vanilla option",
                base_params: vec![option_type_param("call"), strike_param("Strike"), expiry_param()],
                methods: vec![
                    MethodSpec {
                        key: Method::BlackScholes,
                        label: "Closed form (Black–Scholes)",
                        note: "Analytical price + Greeks under lognormal diffusion with constant r, q, σ.",
                        extra_params: Vec::new(),
                    },
                    MethodSpec {
                        key: Method::BinomialCrr,
                        label: "Binomial tree (CRR)",
                        note: "Recombining Cox–Ross–Rubinstein lattice (risk-neutral p, backward induction). \
                               Greeks via bumps.",
                        extra_params: vec![steps_param("Tree steps", DEFAULT_VANILLA_STEPS)],
                    },
                ],
            },
            InstrumentSpec {
                key: InstrumentType::American,
                label: "American option",
                base_params: vec![option_type_param("put"), strike_param("Strike"), expiry_param()],
                methods: vec![MethodSpec {
                    key: Method::BinomialCrr,
                    label: "Binomial tree (CRR)",
                    note: "CRR lattice with early exercise: value = max(intrinsic, continuation) at each node.",
                    extra_params: vec![steps_param("Tree steps", DEFAULT_AMERICAN_STEPS)],
                }],
            },
            InstrumentSpec {
                key: InstrumentType::Digital,
                label: "Digital (cash-or-nothing)",
                base_params: vec![
                    option_type_param("call"),
                    strike_param("Strike"),
                    ParamSpec::number("payout", "Cash payout", DEFAULT_DIGITAL_PAYOUT, Some(0.000001), 0.01),
                    expiry_param(),
                ],
                methods: vec![MethodSpec {
                    key: Method::BlackScholes,
                    label: "Closed form (Black–Scholes)",
                    note: "Analytical discounted payout × N(±d2). Greeks via finite-difference bumps.",
                    extra_params: Vec::new(),
                }],
            },
            InstrumentSpec {
                key: InstrumentType::Barrier,
                label: "Barrier (knock-out)",
                base_params: vec![
                    option_type_param("call"),
                    strike_param("Strike"),
                    ParamSpec::select(
                        "barrier_direction",
                        "Barrier",
                        "up",
                        vec![
                            SelectOption {
                                value: "up",
                                label: "Up-and-out",
                            },
                            SelectOption {
                                value: "down",
                                label: "Down-and-out",
                            },
                        ],
                    ),
                    ParamSpec::number("barrier_level", "Barrier level", 120.0, Some(0.000001), 0.01),
                    expiry_param(),
                ],
                methods: vec![
                    MethodSpec {
                        key: Method::McDiscrete,
                        label: "Monte Carlo (discrete monitoring)",
                        note: "Simulates GBM paths with discrete barrier checks; fast but can miss intra-step hits.",
                        extra_params: barrier_mc_params(),
                    },
                    MethodSpec {
                        key: Method::McBridge,
                        label: "Monte Carlo (Brownian bridge)",
                        note: "Adds a Brownian-bridge correction to reduce discrete barrier miss bias.",
                        extra_params: barrier_mc_params(),
                    },
                ],
            },
            InstrumentSpec {
                key: InstrumentType::Asian,
                label: "Asian option",
                base_params: vec![option_type_param("call"), strike_param("Strike"), expiry_param()],
                methods: vec![
                    MethodSpec {
                        key: Method::GeometricClosedForm,
                        label: "Geometric average (closed form)",
                        note: "Closed-form for continuous geometric-average price under GBM (lognormal).",
                        extra_params: Vec::new(),
                    },
                    MethodSpec {
                        key: Method::ArithmeticMc,
                        label: "Arithmetic average (Monte Carlo)",
                        note: "Simulates GBM paths; arithmetic average over N fixings; Greeks via bump-and-reprice.",
                        extra_params: vec![
                            ParamSpec::number("fixings", "Fixings", DEFAULT_ASIAN_FIXINGS as u64, Some(4.0), 1.0),
                            paths_param(DEFAULT_ASIAN_PATHS),
                            seed_param(DEFAULT_ASIAN_SEED),
                        ],
                    },
                ],
            },
            InstrumentSpec {
                key: InstrumentType::Forward,
                label: "Forward",
                base_params: vec![strike_param("Forward strike"), expiry_param()],
                methods: vec![MethodSpec {
                    key: Method::DiscountedForward,
                    label: "Discounted forward value",
                    note: "PV = S·e^{-qT} − K·e^{-rT}. (Vol ignored; Greeks via bumps.)",
                    extra_params: Vec::new(),
                }],
            },
        ],
    }
}
