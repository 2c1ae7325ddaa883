//! `logwarden check`: load a configuration and report what it registers.

use std::path::PathBuf;

use anyhow::{Context, Result};
use logwarden::{ConfigSource, Registry};

pub fn run(path: Option<PathBuf>) -> Result<()> {
    let registry = Registry::new();
    let described = describe_source(path.as_ref());
    registry
        .configure(path.map(ConfigSource::File))
        .with_context(|| format!("Failed to load logging configuration from {described}"))?;

    println!("Configuration: {described}");
    let default = registry.resolve(None);
    println!(
        "Default logger: {} ({})",
        default.destination(),
        default.level()
    );

    let names = registry.names();
    if names.is_empty() {
        println!("No named loggers.");
    }
    for name in &names {
        let sink = registry.resolve(Some(name.as_str()));
        let marker = if sink == default { " [default]" } else { "" };
        println!("  {name:<20} {:<8} {}{marker}", sink.level(), sink.destination());
    }

    registry.shutdown();
    Ok(())
}

pub fn describe_source(path: Option<&PathBuf>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "default search locations".to_string(),
    }
}
