use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Destination token for the standard output stream.
pub const STDOUT: &str = "STDOUT";

/// Destination token for the standard error stream.
pub const STDERR: &str = "STDERR";

/// Size threshold used when a definition leaves `max_size` unset.
pub const DEFAULT_MAX_SIZE: u64 = 1_048_576;

/// Any `max_size` below this is raised to `DEFAULT_MAX_SIZE`.
pub const MIN_MAX_SIZE: u64 = 1024;

/// Severity of a log record, ordered from least to most important.
///
/// `Unknown` sorts last so that records logged with it pass every level gate
/// short of `Unknown` itself.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    #[default]
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
    Unknown,
}

impl Severity {
    /// Upper-case label as written in log lines.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Debug => "DEBUG",
            Severity::Info => "INFO",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
            Severity::Fatal => "FATAL",
            Severity::Unknown => "ANY",
        }
    }

    /// Parse a level name, falling back to `Debug` for anything unrecognised.
    ///
    /// Matching ignores case and surrounding whitespace.
    pub fn parse_lenient(input: &str) -> Severity {
        input.parse().unwrap_or(Severity::Debug)
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Error returned by the strict `FromStr` implementation of `Severity`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised severity '{0}'")]
pub struct UnknownSeverity(pub String);

impl FromStr for Severity {
    type Err = UnknownSeverity;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "debug" => Ok(Severity::Debug),
            "info" => Ok(Severity::Info),
            "warn" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            "fatal" => Ok(Severity::Fatal),
            "unknown" => Ok(Severity::Unknown),
            _ => Err(UnknownSeverity(s.to_string())),
        }
    }
}

/// How a file sink rotates its output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotation {
    /// Rotate by size, keeping this many old files. Zero disables rotation.
    Count(u64),
    /// Rotate on a time schedule named by the token (e.g. "daily").
    Frequency(String),
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rotation::Count(count) => write!(f, "keep {count}"),
            Rotation::Frequency(token) => f.write_str(token),
        }
    }
}

/// A validated logger definition, ready to be turned into a sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggerDefinition {
    /// Registry key. `None` is the default-logger sentinel.
    pub name: Option<String>,
    /// `STDOUT`, `STDERR` or a file path.
    pub destination: String,
    pub rotation: Option<Rotation>,
    /// Byte threshold before size rotation, already floored.
    pub max_size: Option<u64>,
    pub level: Severity,
    pub is_default: bool,
    pub datetime_format: Option<String>,
}

impl LoggerDefinition {
    /// The definition synthesized when no configured logger claims default.
    pub fn fallback() -> Self {
        Self {
            name: None,
            destination: STDOUT.to_string(),
            rotation: None,
            max_size: None,
            level: Severity::Debug,
            is_default: true,
            datetime_format: None,
        }
    }

    pub fn max_size_or_default(&self) -> u64 {
        self.max_size.unwrap_or(DEFAULT_MAX_SIZE)
    }
}
