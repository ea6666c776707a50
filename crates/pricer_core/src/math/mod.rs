//! Statistics primitives shared by every closed-form formula.

pub mod distributions;

pub use distributions::{norm_cdf, norm_pdf};
