//! `logwarden write`: send one record through a configured logger.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use logwarden::{ConfigSource, Registry, Severity};

pub fn run(path: Option<PathBuf>, logger: Option<&str>, level: &str, message: &str) -> Result<()> {
    let severity: Severity = level
        .parse()
        .with_context(|| format!("Unknown level '{level}'"))?;

    let registry = Registry::new();
    registry
        .configure(path.map(ConfigSource::File))
        .context("Failed to load logging configuration")?;

    if let Some(name) = logger {
        if !registry.names().contains(name) {
            tracing::warn!(logger = name, "Logger is not configured; using the default logger");
        }
    }

    let sink = registry.resolve(logger);
    let written = sink.log(severity, message);
    registry.shutdown();

    if !written {
        bail!(
            "Record at {severity} was filtered out by the logger's level ({})",
            sink.level()
        );
    }
    Ok(())
}
