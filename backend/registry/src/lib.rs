//! `logwarden`: a registry of named loggers.
//!
//! Loggers are declared in settings (an in-memory tree, or a YAML/JSON file)
//! as a list of definitions plus optional aliases. The registry builds one
//! sink per definition, resolves lookups by name with a default fallback,
//! and replaces its whole state on every reconfiguration.
//!
//! ```no_run
//! use logwarden::{ConfigSource, Registry};
//! use serde_json::json;
//!
//! let registry = Registry::new();
//! registry
//!     .configure(Some(ConfigSource::from(json!({
//!         "loggers": [{ "name": "app", "file": "STDOUT", "default": true }],
//!         "aliases": { "web": "app" },
//!     }))))
//!     .unwrap();
//! registry.resolve(Some("web")).info("ready");
//! ```

pub mod global;
pub mod logged;
pub mod registry;

pub use global::{configure, global, logger, names, retarget};
pub use logged::Logged;
pub use registry::Registry;

pub use logwarden_config::{Alias, ConfigLoader, ConfigSource, Settings};
pub use logwarden_core::{Error, LoggerDefinition, Result, Rotation, Severity};
pub use logwarden_logging::{install_tracing, Sink, SinkFactory, Target};
