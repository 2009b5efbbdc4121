use std::path::PathBuf;

use anyhow::{Context, Result};

const APP_DIR_NAME: &str = "clipkeep";

/// Platform data directory for clipkeep's durable store.
///
/// Resolves to e.g. `~/.local/share/clipkeep` on Linux or
/// `~/Library/Application Support/clipkeep` on macOS.
pub fn default_data_dir() -> Result<PathBuf> {
    let base = dirs::data_dir().context("no platform data directory available")?;
    Ok(base.join(APP_DIR_NAME))
}
