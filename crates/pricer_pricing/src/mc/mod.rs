//! Monte Carlo pricing engines.
//!
//! Both engines simulate GBM in log space with the exact step
//! `S·exp((r − q − ½σ²)dt + σ√dt·Z)` and discount the mean payoff at the
//! risk-free rate.
//!
//! # Architecture
//!
//! ```text
//! mc
//! ├── McConfig     (paths, steps/fixings, seed; validated bounds)
//! ├── GbmParams    (per-step drift and diffusion constants)
//! ├── barrier      (knock-out, discrete or Brownian-bridge monitoring)
//! └── asian        (arithmetic average over discrete fixings)
//! ```
//!
//! Each engine has three entry points: a seeded one, one taking
//! caller-supplied draws, and one going through a [`RandomDrawCache`] so a
//! Greeks computation can re-price on common random numbers.
//!
//! [`RandomDrawCache`]: crate::rng::RandomDrawCache

mod asian;
mod barrier;
mod config;
mod error;
mod paths;

pub use asian::{price_mc_asian_arithmetic, price_mc_asian_arithmetic_cached, price_mc_asian_arithmetic_with_draws};
pub use barrier::{price_mc_barrier, price_mc_barrier_cached, price_mc_barrier_with_draws, KnockOutBarrier};
pub use config::{McConfig, McConfigBuilder, MAX_PATHS, MAX_STEPS};
pub use error::ConfigError;
pub use paths::{fill_spot_path, GbmParams, LogStep};
