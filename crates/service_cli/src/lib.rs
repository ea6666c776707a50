//! Service layer behind the `pricer` binary.
//!
//! Configuration, error handling, output rendering and the command
//! implementations live here so they can be exercised without spawning the
//! binary.

pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use error::{CliError, Result};
