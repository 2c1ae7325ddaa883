//! Where a configuration comes from, and turning it into `Settings`.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use logwarden_core::Result;
use serde_json::Value;
use tracing::debug;

use crate::io::{find_default_file, read_file, read_stream};
use crate::schema::Settings;

/// A configuration source handed to `configure`.
pub enum ConfigSource {
    /// An in-memory settings tree; no I/O is performed.
    Settings(Value),
    /// A YAML or JSON file.
    File(PathBuf),
    /// Any reader yielding YAML or JSON text.
    Stream(Box<dyn Read>),
}

impl From<Value> for ConfigSource {
    fn from(value: Value) -> Self {
        ConfigSource::Settings(value)
    }
}

impl From<PathBuf> for ConfigSource {
    fn from(path: PathBuf) -> Self {
        ConfigSource::File(path)
    }
}

impl From<&Path> for ConfigSource {
    fn from(path: &Path) -> Self {
        ConfigSource::File(path.to_path_buf())
    }
}

impl fmt::Debug for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigSource::Settings(value) => f.debug_tuple("Settings").field(value).finish(),
            ConfigSource::File(path) => f.debug_tuple("File").field(path).finish(),
            ConfigSource::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Loads `Settings` from a source, searching for a default file when none
/// is given.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    search_root: PathBuf,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self {
            search_root: PathBuf::from("."),
        }
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Look for default configuration files under `root` instead of the
    /// working directory.
    pub fn with_search_root(root: impl Into<PathBuf>) -> Self {
        Self {
            search_root: root.into(),
        }
    }

    pub fn search_root(&self) -> &Path {
        &self.search_root
    }

    pub fn find_default_file(&self) -> Option<PathBuf> {
        find_default_file(&self.search_root)
    }

    /// Resolve `source` to parsed settings.
    ///
    /// `None` uses the first default file found, or an empty configuration
    /// if there is none.
    pub fn load(&self, source: Option<ConfigSource>) -> Result<Settings> {
        let value = match source {
            Some(ConfigSource::Settings(value)) => value,
            Some(ConfigSource::File(path)) => read_file(&path)?,
            Some(ConfigSource::Stream(mut reader)) => read_stream(&mut reader)?,
            None => match self.find_default_file() {
                Some(path) => read_file(&path)?,
                None => {
                    debug!(
                        root = %self.search_root.display(),
                        "No default logging configuration found"
                    );
                    Value::Null
                }
            },
        };
        Settings::from_value(&value)
    }
}
