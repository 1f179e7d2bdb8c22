use std::path::PathBuf;

use anyhow::{Context, Result};
use moneybear::config::Config;

pub const CONFIG_FILE_NAME: &str = "moneybear.toml";

/// Write a default configuration file into `path`
pub async fn init_config(path: PathBuf) -> Result<()> {
    let config_path = path.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        anyhow::bail!("{} already exists", config_path.display());
    }

    std::fs::create_dir_all(&path)
        .with_context(|| format!("Failed to create {}", path.display()))?;

    let content = format!("# Moneybear configuration\n\n{}", Config::default().to_toml()?);
    std::fs::write(&config_path, content)
        .with_context(|| format!("Failed to write {}", config_path.display()))?;

    println!("Created configuration at {}", config_path.display());
    println!();
    println!("Start the search API with:");
    println!("  moneybear -c {} serve", config_path.display());
    Ok(())
}
