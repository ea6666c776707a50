//! Monte Carlo simulation configuration.

use pricer_models::instruments::McParams;

use super::error::ConfigError;

pub use pricer_models::instruments::{MAX_PATHS, MAX_STEPS};

/// Monte Carlo simulation configuration.
///
/// Immutable once built; use [`McConfig::builder`] or [`McConfig::new`].
/// `steps` is the number of time steps (barrier) or fixings (Asian).
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::McConfig;
///
/// let config = McConfig::builder()
///     .paths(10_000)
///     .steps(52)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.paths(), 10_000);
/// assert_eq!(config.steps(), 52);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct McConfig {
    paths: usize,
    steps: usize,
    seed: u64,
}

impl McConfig {
    /// Creates a validated configuration.
    pub fn new(paths: usize, steps: usize, seed: u64) -> Result<Self, ConfigError> {
        let config = Self { paths, steps, seed };
        config.validate()?;
        Ok(config)
    }

    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> McConfigBuilder {
        McConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn paths(&self) -> usize {
        self.paths
    }

    /// Returns the number of time steps (or fixings) per path.
    #[inline]
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Returns the RNG seed.
    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `paths` is 0 or greater than 10,000,000
    /// - `steps` is 0 or greater than 10,000
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.paths == 0 || self.paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.paths));
        }
        if self.steps == 0 || self.steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.steps));
        }
        Ok(())
    }
}

impl TryFrom<McParams> for McConfig {
    type Error = ConfigError;

    fn try_from(params: McParams) -> Result<Self, Self::Error> {
        McConfig::new(params.paths, params.steps, params.seed)
    }
}

/// Outcome of engine input validation.
pub(crate) enum Prepared {
    /// Price known without simulation (expired, or knocked out at t = 0).
    Settled(f64),
    /// Simulation required.
    Simulate(McConfig),
}

/// Builder for [`McConfig`].
#[derive(Clone, Debug)]
pub struct McConfigBuilder {
    paths: usize,
    steps: usize,
    seed: u64,
}

impl Default for McConfigBuilder {
    fn default() -> Self {
        Self {
            paths: 10_000,
            steps: 1,
            seed: 0,
        }
    }
}

impl McConfigBuilder {
    /// Sets the number of paths.
    #[inline]
    pub fn paths(mut self, paths: usize) -> Self {
        self.paths = paths;
        self
    }

    /// Sets the number of time steps (or fixings).
    #[inline]
    pub fn steps(mut self, steps: usize) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the RNG seed.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Builds and validates the configuration.
    pub fn build(self) -> Result<McConfig, ConfigError> {
        McConfig::new(self.paths, self.steps, self.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let config = McConfig::builder().build().unwrap();
        assert_eq!(config.paths(), 10_000);
        assert_eq!(config.steps(), 1);
        assert_eq!(config.seed(), 0);
    }

    #[test]
    fn test_validation_bounds() {
        assert!(McConfig::new(1, 1, 0).is_ok());
        assert!(McConfig::new(MAX_PATHS, MAX_STEPS, 0).is_ok());
        assert_eq!(McConfig::new(0, 10, 0), Err(ConfigError::InvalidPathCount(0)));
        assert_eq!(
            McConfig::new(MAX_PATHS + 1, 10, 0),
            Err(ConfigError::InvalidPathCount(MAX_PATHS + 1))
        );
        assert_eq!(McConfig::new(10, 0, 0), Err(ConfigError::InvalidStepCount(0)));
        assert_eq!(
            McConfig::new(10, MAX_STEPS + 1, 0),
            Err(ConfigError::InvalidStepCount(MAX_STEPS + 1))
        );
    }

    #[test]
    fn test_from_product_params() {
        let params = McParams {
            paths: 20_000,
            steps: 96,
            seed: 7,
        };
        let config = McConfig::try_from(params).unwrap();
        assert_eq!((config.paths(), config.steps(), config.seed()), (20_000, 96, 7));
    }
}
