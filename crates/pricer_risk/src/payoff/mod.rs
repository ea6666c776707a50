//! Terminal payoff curves and P&L at expiry.
//!
//! Only path-independent legs have a payoff that can be read off a single
//! terminal spot. Barrier and Asian legs are reported as excluded.

mod curve;
mod pnl;

pub use curve::{
    payoff_curve, spot_ladder, ExcludedLeg, PayoffCurve, MAX_LADDER_STEPS, MIN_LADDER_STEPS, PATH_DEPENDENT,
};
pub use pnl::{pnl_profile, terminal_slope_high, PnlProfile, BREAKEVEN_DEDUP_TOL, UNLIMITED_SLOPE_TOL};
