//! `logwarden-config` turns loosely typed logging settings into
//! validated logger definitions.
//!
//! Provides:
//! - Key lookup accepting both `:key` and `key` spellings
//! - Per-logger normalization with defaults and numeric coercion
//! - `loggers` / `aliases` extraction
//! - YAML/JSON reading with extension detection and trial parsing
//! - Default configuration file discovery

pub mod io;
pub mod keys;
pub mod normalize;
pub mod schema;
pub mod source;

pub use io::{find_default_file, parse_str, read_file, read_stream, Format, DEFAULT_FILE_NAMES};
pub use normalize::normalize;
pub use schema::{Alias, Settings};
pub use source::{ConfigLoader, ConfigSource};
