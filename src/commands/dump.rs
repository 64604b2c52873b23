//! Dump and keys command handlers

use anyhow::Result;
use layerconf::{Config, Value};

pub fn cmd_dump(config: &Config) -> Result<()> {
    println!("{}", render_settings(config)?);
    Ok(())
}

pub fn cmd_keys(config: &Config) -> Result<()> {
    for key in config.all_keys() {
        println!("{key}");
    }
    Ok(())
}

/// Merged settings as pretty-printed JSON.
pub fn render_settings(config: &Config) -> Result<String> {
    Ok(serde_json::to_string_pretty(&Value::Object(
        config.all_settings(),
    ))?)
}
