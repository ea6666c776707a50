//! # Random Number Generation Infrastructure
//!
//! - [`prng`]: seeded PRNG wrapper (`StdRng` + `StandardNormal`)
//! - [`cache`]: row-major draw matrices and the call-scoped
//!   [`RandomDrawCache`] used for common random numbers across bumps
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_pricing::rng::{DrawKey, PricerRng, RandomDrawCache};
//!
//! let mut rng = PricerRng::from_seed(12345);
//! let mut cache = RandomDrawCache::new();
//! cache.insert(DrawKey::Normal, rng.normal_matrix(1_000, 52));
//! assert_eq!(cache.get(DrawKey::Normal).unwrap().shape(), (1_000, 52));
//! ```

pub mod cache;
pub mod prng;

pub use cache::{DrawKey, DrawMatrix, RandomDrawCache};
pub use prng::PricerRng;
