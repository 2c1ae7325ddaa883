//! Top-level settings: the `loggers` and `aliases` sections.

use logwarden_core::{Error, LoggerDefinition, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::keys::{self, lookup};
use crate::normalize::normalize;

/// One `aliases` entry: `name` resolves to whatever `target` resolves to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Alias {
    pub name: String,
    /// `None` points the alias at the default logger.
    pub target: Option<String>,
}

/// Parsed logging settings, in source order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Settings {
    pub loggers: Vec<LoggerDefinition>,
    pub aliases: Vec<Alias>,
}

impl Settings {
    /// Extract settings from a decoded document. `null` is an empty
    /// configuration; anything other than a mapping is rejected.
    pub fn from_value(value: &Value) -> Result<Self> {
        match value {
            Value::Null => Ok(Self::default()),
            Value::Object(map) => Self::from_map(map),
            _ => Err(Error::shape("logging configuration must be a mapping")),
        }
    }

    pub fn from_map(map: &Map<String, Value>) -> Result<Self> {
        Ok(Self {
            loggers: loggers(lookup(map, keys::LOGGERS))?,
            aliases: aliases(lookup(map, keys::ALIASES))?,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty() && self.aliases.is_empty()
    }
}

fn loggers(value: Option<&Value>) -> Result<Vec<LoggerDefinition>> {
    match value {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Object(entry)) => Ok(vec![normalize(entry)?]),
        Some(Value::Array(entries)) => entries
            .iter()
            .enumerate()
            .map(|(index, entry)| match entry {
                Value::Object(entry) => normalize(entry),
                _ => Err(Error::shape(format!(
                    "loggers[{index}] must be a mapping of logger settings"
                ))),
            })
            .collect(),
        Some(_) => Err(Error::shape(
            "the loggers entry must be a mapping or a list of mappings",
        )),
    }
}

fn aliases(value: Option<&Value>) -> Result<Vec<Alias>> {
    let map = match value {
        None | Some(Value::Null) => return Ok(Vec::new()),
        Some(Value::Object(map)) => map,
        Some(_) => return Err(Error::shape("the aliases entry must be a mapping")),
    };

    map.iter()
        .map(|(name, target)| {
            let target = match target {
                Value::Null => None,
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                Value::Bool(b) => Some(b.to_string()),
                _ => {
                    return Err(Error::shape(format!(
                        "alias '{name}' must name another logger"
                    )))
                }
            };
            Ok(Alias {
                name: name.clone(),
                target,
            })
        })
        .collect()
}
