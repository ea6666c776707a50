//! Scenario analysis.
//!
//! A scenario grid re-prices the portfolio over spot percentage shifts
//! (columns) and absolute vol shifts (rows) under a common rate shift. Legs
//! that fail to parse or price are skipped and logged; the grid is a quick
//! visual, not an audit trail.

mod grid;

pub use grid::{scenario_grid, scenario_grid_with_config, ScenarioGrid, MAX_AXIS_LEN, MAX_GRID_CELLS, VOL_FLOOR};
