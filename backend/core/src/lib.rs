//! Core types shared by the logwarden crates.
//!
//! Provides:
//! - `Severity` levels and their lenient parsing
//! - `LoggerDefinition`, the normalized form of one logger entry
//! - `Rotation` policies and size constants
//! - The library-wide `Error` type

pub mod error;
pub mod types;

pub use error::{Error, Result};
pub use types::{
    LoggerDefinition, Rotation, Severity, DEFAULT_MAX_SIZE, MIN_MAX_SIZE, STDERR, STDOUT,
};
