//! Effective configuration dump

use super::load_config;
use anyhow::{bail, Result};

pub fn run(path: Option<&str>, format: &str) -> Result<()> {
    let config = load_config(path)?;
    let output = match format {
        "json" => serde_json::to_string_pretty(&config)?,
        "toml" => config.to_toml_string()?,
        other => bail!("unknown format '{}'; valid values: json, toml", other),
    };
    println!("{}", output);
    Ok(())
}
