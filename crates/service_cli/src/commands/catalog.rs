//! Catalog command implementation

use std::io::Write;

use pricer_models::catalog::catalog;

use crate::Result;

/// Run the catalog command: the instrument/method catalog as JSON.
pub fn run<W: Write>(out: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, &catalog())?;
    writeln!(out)?;
    Ok(())
}
