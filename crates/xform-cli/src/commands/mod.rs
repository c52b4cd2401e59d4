//! CLI command implementations

pub mod audit;
pub mod levels;

use anyhow::{Context, Result};
use xform_core::SimdLevel;

/// Parse a level name given on the command line.
pub fn parse_level(name: &str) -> Result<SimdLevel> {
    name.parse::<SimdLevel>()
        .with_context(|| format!("Invalid --level '{name}'"))
}
