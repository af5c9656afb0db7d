//! Config validation command

use super::load_config;
use anyhow::Result;

pub fn run(path: &str) -> Result<()> {
    let config = load_config(Some(path))?;
    println!("{} is valid", path);
    println!(
        "  target {} bubble(s), pool capacity {}",
        config.target_active,
        config.capacity()
    );
    if config.density.scale_with_area {
        println!(
            "  area scaling on: {}..={} bubble(s)",
            config.density.target_min, config.density.target_max
        );
    }
    if config.pop.enabled {
        println!(
            "  popping on{}",
            if config.pop.burst { " with bursts" } else { "" }
        );
    }
    Ok(())
}
