//! Recombining lattice pricers.

mod binomial;

pub use binomial::{crr_parameters, price_binomial, CrrParameters};
