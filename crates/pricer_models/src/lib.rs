//! # Pricer Models (L2: Business Logic)
//!
//! Closed-form formulas, typed instruments and the method catalog.
//!
//! This crate provides:
//! - Analytical pricers: Black-Scholes (with dividend yield and analytic
//!   Greeks), call spreads, cash-or-nothing digitals, continuous
//!   geometric-average Asians, discounted forwards (`analytical`)
//! - Instrument definitions: the [`instruments::Product`] tagged union,
//!   loose [`instruments::LegRequest`] parsing with numeric coercion
//! - The static instrument/method catalog (`catalog`)
//!
//! ## Design Principles
//!
//! - **Enum-based instruments** for static dispatch
//! - **Validate at construction**: a `Product` that exists can be priced
//! - **Errors convert** into [`pricer_core::types::PricingError`]

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod catalog;
pub mod instruments;
