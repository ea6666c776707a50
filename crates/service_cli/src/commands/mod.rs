//! CLI command implementations
//!
//! Each submodule implements a specific CLI command. Commands write their
//! result to the supplied writer so they can be driven from tests.

pub mod catalog;
pub mod grid;
pub mod payoff;
pub mod price;

use std::io::Read;
use std::path::Path;

use pricer_risk::portfolio::PortfolioRequest;
use tracing::debug;

use crate::{CliError, Result};

/// Reads a `{market, legs}` request from a JSON file, or stdin for `-`.
pub fn load_request(input: &Path) -> Result<PortfolioRequest> {
    let text = if input == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !input.exists() {
            return Err(CliError::FileNotFound(input.display().to_string()));
        }
        std::fs::read_to_string(input)?
    };
    let request: PortfolioRequest = serde_json::from_str(&text)?;
    debug!(legs = request.legs.len(), input = %input.display(), "request loaded");
    Ok(request)
}
