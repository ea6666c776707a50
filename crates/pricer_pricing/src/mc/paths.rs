//! Log-space GBM path construction.
//!
//! Each engine fills one reusable path buffer per row of normal draws with
//! [`fill_spot_path`]. The increment per step is the exact log-space
//! solution
//!
//! ```text
//! ln S(t+dt) = ln S(t) + (r - q - ½σ²)dt + σ√dt · Z
//! ```

/// Risk-neutral GBM parameters.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let gbm = GbmParams::new(100.0, 0.05, 0.0, 0.2, 1.0);
/// let step = gbm.step(4);
/// assert!((step.dt - 0.25).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot price (S₀).
    pub spot: f64,
    /// Risk-free rate (r), annualised.
    pub rate: f64,
    /// Continuous dividend yield (q), annualised.
    pub dividend_yield: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Time to maturity (T) in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(spot: f64, rate: f64, dividend_yield: f64, volatility: f64, maturity: f64) -> Self {
        Self {
            spot,
            rate,
            dividend_yield,
            volatility,
            maturity,
        }
    }

    /// Precomputes the per-step constants for an `n_steps` uniform grid.
    #[inline]
    pub fn step(&self, n_steps: usize) -> LogStep {
        let dt = self.maturity / n_steps as f64;
        LogStep {
            dt,
            drift_dt: (self.rate - self.dividend_yield - 0.5 * self.volatility * self.volatility) * dt,
            vol_sqrt_dt: self.volatility * dt.sqrt(),
        }
    }

    /// Discount factor e^(−rT).
    #[inline]
    pub fn discount(&self) -> f64 {
        (-self.rate * self.maturity).exp()
    }
}

/// Constant log increment of a uniform time grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LogStep {
    /// Step length in years.
    pub dt: f64,
    /// (r − q − ½σ²)·dt
    pub drift_dt: f64,
    /// σ·√dt
    pub vol_sqrt_dt: f64,
}

impl LogStep {
    /// Log increment for one normal draw.
    #[inline]
    pub fn increment(&self, z: f64) -> f64 {
        self.drift_dt + self.vol_sqrt_dt * z
    }
}

/// Fills `out` with the spot levels S(t₁)..S(tₙ) of one path.
///
/// `out.len()` must equal `z.len()`.
pub fn fill_spot_path(spot: f64, step: LogStep, z: &[f64], out: &mut [f64]) {
    debug_assert_eq!(z.len(), out.len());
    let mut log_s = spot.ln();
    for (s, &dz) in out.iter_mut().zip(z) {
        log_s += step.increment(dz);
        *s = log_s.exp();
    }
}
