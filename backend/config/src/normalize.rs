//! Normalization of a single raw logger entry.
//!
//! Raw entries come straight from YAML/JSON, so every field may arrive as a
//! string, a number, or be missing. `normalize` applies defaults and
//! coercions and produces a `LoggerDefinition`.

use chrono::format::{Item, StrftimeItems};
use logwarden_core::{
    Error, LoggerDefinition, Result, Rotation, Severity, DEFAULT_MAX_SIZE, MIN_MAX_SIZE, STDOUT,
};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Number, Value};

use crate::keys::{self, lookup};

/// A rotation string made only of digits (whitespace allowed around them).
static RETAINED_COUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*\d+\s*$").unwrap());

/// Leading integer of a size string; trailing text is ignored.
static LEADING_INTEGER: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*([+-]?\d+)").unwrap());

/// Values of `default` that count as true when given as a string.
const TRUTHY: [&str; 4] = ["true", "yes", "on", "1"];

/// Build a `LoggerDefinition` from one raw `loggers` entry.
pub fn normalize(raw: &Map<String, Value>) -> Result<LoggerDefinition> {
    let name = scalar_string(keys::NAME, lookup(raw, keys::NAME))?;

    let destination = scalar_string(keys::FILE, lookup(raw, keys::FILE))?
        .filter(|file| !file.is_empty())
        .unwrap_or_else(|| STDOUT.to_string());

    Ok(LoggerDefinition {
        name,
        destination,
        rotation: rotation(lookup(raw, keys::ROTATION))?,
        max_size: max_size(lookup(raw, keys::MAX_SIZE))?,
        level: level(lookup(raw, keys::LEVEL)),
        is_default: is_default(lookup(raw, keys::DEFAULT)),
        datetime_format: datetime_format(lookup(raw, keys::DATETIME_FORMAT))?,
    })
}

fn scalar_string(field: &str, value: Option<&Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(Value::Number(n)) => Ok(Some(n.to_string())),
        Some(Value::Bool(b)) => Ok(Some(b.to_string())),
        Some(_) => Err(Error::shape(format!("logger '{field}' must be a scalar value"))),
    }
}

fn rotation(value: Option<&Value>) -> Result<Option<Rotation>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => Ok(Some(Rotation::Count(clamp_to_u64(n)))),
        Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
        Some(Value::String(s)) if RETAINED_COUNT.is_match(s) => s
            .trim()
            .parse()
            .map(|count| Some(Rotation::Count(count)))
            .map_err(|_| Error::shape(format!("logger rotation '{}' is out of range", s.trim()))),
        Some(Value::String(s)) => Ok(Some(Rotation::Frequency(s.trim().to_string()))),
        Some(_) => Err(Error::shape(
            "logger 'rotation' must be a file count or a frequency name",
        )),
    }
}

fn max_size(value: Option<&Value>) -> Result<Option<u64>> {
    let size = match value {
        None | Some(Value::Null) => return Ok(None),
        Some(Value::Number(n)) => clamp_to_u64(n),
        Some(Value::String(s)) => leading_integer(s),
        Some(_) => return Err(Error::shape("logger 'max_size' must be a number")),
    };
    Ok(Some(if size < MIN_MAX_SIZE {
        DEFAULT_MAX_SIZE
    } else {
        size
    }))
}

fn level(value: Option<&Value>) -> Severity {
    match value {
        Some(Value::String(s)) => Severity::parse_lenient(s),
        _ => Severity::Debug,
    }
}

fn is_default(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => {
            let s = s.to_ascii_lowercase();
            TRUTHY.contains(&s.as_str())
        }
        _ => false,
    }
}

fn datetime_format(value: Option<&Value>) -> Result<Option<String>> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(format)) => {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                return Err(Error::shape(format!(
                    "logger datetime_format '{format}' is not a valid strftime format"
                )));
            }
            Ok(Some(format.clone()))
        }
        Some(_) => Err(Error::shape("logger 'datetime_format' must be a string")),
    }
}

/// Negative numbers become zero, fractions are truncated.
fn clamp_to_u64(n: &Number) -> u64 {
    if let Some(v) = n.as_u64() {
        v
    } else if let Some(v) = n.as_i64() {
        v.max(0) as u64
    } else {
        n.as_f64().filter(|f| *f > 0.0).map_or(0, |f| f as u64)
    }
}

/// Integer prefix of `s`, or zero when there is none.
fn leading_integer(s: &str) -> u64 {
    LEADING_INTEGER
        .captures(s)
        .and_then(|caps| caps[1].parse::<i128>().ok())
        .map_or(0, |v| v.clamp(0, u64::MAX as i128) as u64)
}
