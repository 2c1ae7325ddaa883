//! `logwarden inspect`: show the normalized settings without opening sinks.

use std::path::PathBuf;

use anyhow::{Context, Result};
use logwarden::{ConfigLoader, ConfigSource};

use crate::check_cmd::describe_source;

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let described = describe_source(path.as_ref());
    let loader = ConfigLoader::new();
    if path.is_none() {
        match loader.find_default_file() {
            Some(found) => {
                tracing::info!(path = %found.display(), "Using default configuration file")
            }
            None => tracing::info!("No default configuration file; showing empty settings"),
        }
    }

    let settings = loader
        .load(path.map(ConfigSource::File))
        .with_context(|| format!("Failed to load logging configuration from {described}"))?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
