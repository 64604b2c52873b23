//! Command handlers for the layerconf binary

use std::path::PathBuf;

use anyhow::{Context, Result};
use layerconf::Config;

pub mod dump;
pub mod get;

/// Build a config from the global `--format` and `--file` flags.
pub fn load_config(format: &str, files: &[PathBuf]) -> Result<Config> {
    let mut config = Config::new(format);
    config
        .read_config_files(files)
        .with_context(|| format!("Failed to load {} layer(s) as {}", files.len(), format))?;
    Ok(config)
}

pub fn cmd_env_key(key: &str) -> Result<()> {
    println!("{}", layerconf::to_env_key(key));
    Ok(())
}
