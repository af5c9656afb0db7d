//! CLI command implementations

pub mod check;
pub mod config;
pub mod simulate;

use anyhow::{Context, Result};
use froth_particles::BubbleConfig;

/// Load a config file, or the defaults when no path is given
pub fn load_config(path: Option<&str>) -> Result<BubbleConfig> {
    match path {
        Some(path) => {
            BubbleConfig::load(path).with_context(|| format!("failed to load config '{}'", path))
        }
        None => Ok(BubbleConfig::default()),
    }
}
