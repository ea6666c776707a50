//! Bump-and-revalue Greeks for any pricer.
//!
//! [`finite_difference_greeks`] drives a price function of
//! `(spot, rate, vol, time_to_expiry)` through the bumps below and returns
//! per-unit sensitivities in the same units as the analytic Black–Scholes
//! Greeks: per 1.0 of spot, per 1.0 absolute vol, per 1.0 absolute rate and
//! per year of calendar time.
//!
//! | Greek | Central | Forward |
//! |-------|---------|---------|
//! | delta | (f↑ − f↓)/2dS | (f↑ − f₀)/dS |
//! | gamma | (f↑ − 2f₀ + f↓)/dS² | same |
//! | vega  | (f(σ+dσ) − f(σ−dσ))/2dσ | (f(σ+dσ) − f₀)/dσ |
//! | rho   | (f(r+dr) − f(r−dr))/2dr | (f(r+dr) − f₀)/dr |
//! | theta | (f(T−dT) − f₀)/dT | same |

use pricer_core::types::{Greeks, PricingError};
use serde::{Deserialize, Serialize};

/// Smallest spot a down bump may reach.
pub const SPOT_FLOOR: f64 = 1e-12;
/// Smallest vol a down bump may reach.
pub const VOL_FLOOR: f64 = 1e-8;
/// Smallest bump of any kind.
pub const MIN_BUMP: f64 = 1e-8;

/// Difference scheme.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FdScheme {
    /// Symmetric two-sided difference.
    #[default]
    Central,
    /// One-sided difference against the base price. Less sensitive to
    /// Monte Carlo noise.
    Forward,
}

/// Scheme per Greek family.
///
/// Gamma always uses the three-point formula and theta always shortens
/// expiry, whatever is chosen here.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FdSchemes {
    /// Delta
    pub spot: FdScheme,
    /// Vega
    pub vol: FdScheme,
    /// Rho
    pub rate: FdScheme,
}

impl FdSchemes {
    /// Central differences everywhere.
    pub const fn central() -> Self {
        Self {
            spot: FdScheme::Central,
            vol: FdScheme::Central,
            rate: FdScheme::Central,
        }
    }

    /// Forward differences everywhere.
    pub const fn forward() -> Self {
        Self {
            spot: FdScheme::Forward,
            vol: FdScheme::Forward,
            rate: FdScheme::Forward,
        }
    }

    /// Same scheme for every family.
    pub const fn uniform(scheme: FdScheme) -> Self {
        Self {
            spot: scheme,
            vol: scheme,
            rate: scheme,
        }
    }
}

/// Bump sizes. Spot is relative, the others absolute.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::BumpSizes;
///
/// let bumps = BumpSizes::default().with_spot_rel(1e-3);
/// assert_eq!(bumps.spot_rel, 1e-3);
/// assert_eq!(bumps.vol_abs, 1e-4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BumpSizes {
    /// Relative spot bump.
    pub spot_rel: f64,
    /// Absolute vol bump.
    pub vol_abs: f64,
    /// Absolute rate bump.
    pub rate_abs: f64,
    /// Absolute time bump in years, capped at half the expiry.
    pub time_abs: f64,
}

impl Default for BumpSizes {
    fn default() -> Self {
        Self {
            spot_rel: 1e-4,
            vol_abs: 1e-4,
            rate_abs: 1e-4,
            time_abs: 1e-4,
        }
    }
}

impl BumpSizes {
    /// Sets the relative spot bump.
    pub fn with_spot_rel(mut self, spot_rel: f64) -> Self {
        self.spot_rel = spot_rel;
        self
    }

    /// Sets the absolute vol bump.
    pub fn with_vol_abs(mut self, vol_abs: f64) -> Self {
        self.vol_abs = vol_abs;
        self
    }

    /// Sets the absolute rate bump.
    pub fn with_rate_abs(mut self, rate_abs: f64) -> Self {
        self.rate_abs = rate_abs;
        self
    }

    /// Sets the absolute time bump.
    pub fn with_time_abs(mut self, time_abs: f64) -> Self {
        self.time_abs = time_abs;
        self
    }
}

/// Finite-difference Greeks of `price_fn(spot, rate, vol, time_to_expiry)`.
///
/// Returns all zeros when `time_to_expiry <= 0`, before any other input is
/// looked at. Errors from `price_fn` propagate unchanged.
///
/// # Errors
/// `Domain` if spot or vol is not strictly positive.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::greeks::{finite_difference_greeks, BumpSizes, FdSchemes};
///
/// // V = S²: delta 2S, gamma 2
/// let greeks = finite_difference_greeks(
///     |s, _r, _v, _t| Ok(s * s),
///     10.0, 0.0, 0.2, 1.0,
///     &BumpSizes::default(),
///     FdSchemes::central(),
/// ).unwrap();
/// assert!((greeks.delta - 20.0).abs() < 1e-6);
/// assert!((greeks.gamma - 2.0).abs() < 1e-3);
/// ```
pub fn finite_difference_greeks<F>(
    price_fn: F,
    spot: f64,
    rate: f64,
    vol: f64,
    time_to_expiry: f64,
    bumps: &BumpSizes,
    schemes: FdSchemes,
) -> Result<Greeks, PricingError>
where
    F: FnMut(f64, f64, f64, f64) -> Result<f64, PricingError>,
{
    finite_difference_evaluation(price_fn, spot, rate, vol, time_to_expiry, bumps, schemes).map(|e| e.greeks)
}

/// Greeks together with the unbumped price the differences were taken
/// against.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FdEvaluation {
    /// `price_fn` at the unbumped inputs; `None` when expired, since the
    /// price function is not called then.
    pub base_price: Option<f64>,
    /// Sensitivities.
    pub greeks: Greeks,
}

/// [`finite_difference_greeks`] that also hands back the base price, so
/// callers need not evaluate it a second time.
pub fn finite_difference_evaluation<F>(
    mut price_fn: F,
    spot: f64,
    rate: f64,
    vol: f64,
    time_to_expiry: f64,
    bumps: &BumpSizes,
    schemes: FdSchemes,
) -> Result<FdEvaluation, PricingError>
where
    F: FnMut(f64, f64, f64, f64) -> Result<f64, PricingError>,
{
    if time_to_expiry <= 0.0 {
        return Ok(FdEvaluation {
            base_price: None,
            greeks: Greeks::zero(),
        });
    }
    if !(spot.is_finite() && spot > 0.0) {
        return Err(PricingError::domain("spot must be > 0"));
    }
    if !(vol.is_finite() && vol > 0.0) {
        return Err(PricingError::domain("vol must be > 0"));
    }

    let t = time_to_expiry;
    let ds = (spot * bumps.spot_rel).max(MIN_BUMP);
    let dv = bumps.vol_abs.max(MIN_BUMP);
    let dr = bumps.rate_abs.max(MIN_BUMP);
    let dt = bumps.time_abs.max(MIN_BUMP).min(0.5 * t);

    let p0 = price_fn(spot, rate, vol, t)?;

    let p_up = price_fn(spot + ds, rate, vol, t)?;
    let p_dn = price_fn((spot - ds).max(SPOT_FLOOR), rate, vol, t)?;
    let delta = match schemes.spot {
        FdScheme::Central => (p_up - p_dn) / (2.0 * ds),
        FdScheme::Forward => (p_up - p0) / ds,
    };
    let gamma = (p_up - 2.0 * p0 + p_dn) / (ds * ds);

    let pv_up = price_fn(spot, rate, vol + dv, t)?;
    let vega = match schemes.vol {
        FdScheme::Central => {
            let pv_dn = price_fn(spot, rate, (vol - dv).max(VOL_FLOOR), t)?;
            (pv_up - pv_dn) / (2.0 * dv)
        }
        FdScheme::Forward => (pv_up - p0) / dv,
    };

    let pr_up = price_fn(spot, rate + dr, vol, t)?;
    let rho = match schemes.rate {
        FdScheme::Central => {
            let pr_dn = price_fn(spot, rate - dr, vol, t)?;
            (pr_up - pr_dn) / (2.0 * dr)
        }
        FdScheme::Forward => (pr_up - p0) / dr,
    };

    let p_shorter = price_fn(spot, rate, vol, t - dt)?;
    let theta = (p_shorter - p0) / dt;

    Ok(FdEvaluation {
        base_price: Some(p0),
        greeks: Greeks::new(delta, gamma, vega, theta, rho),
    })
}
