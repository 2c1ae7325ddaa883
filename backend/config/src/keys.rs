//! Settings key lookup.
//!
//! Configuration written for symbol-keyed loaders spells keys as `:name`;
//! plain loaders use `name`. Both are accepted, the symbolic form first.

use serde_json::{Map, Value};

pub const LOGGERS: &str = "loggers";
pub const ALIASES: &str = "aliases";

pub const NAME: &str = "name";
pub const FILE: &str = "file";
pub const ROTATION: &str = "rotation";
pub const MAX_SIZE: &str = "max_size";
pub const LEVEL: &str = "level";
pub const DEFAULT: &str = "default";
pub const DATETIME_FORMAT: &str = "datetime_format";

/// Fetch `key` from `map`, trying `:key` before `key`.
///
/// A present key wins even when its value is `null`.
pub fn lookup<'a>(map: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    map.get(&format!(":{key}")).or_else(|| map.get(key))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_plain_key() {
        let map = object(json!({ "name": "audit" }));
        assert_eq!(lookup(&map, NAME), Some(&json!("audit")));
    }

    #[test]
    fn test_symbolic_key_wins() {
        let map = object(json!({ "name": "plain", ":name": "symbolic" }));
        assert_eq!(lookup(&map, NAME), Some(&json!("symbolic")));
    }

    #[test]
    fn test_present_null_shadows_plain_key() {
        let map = object(json!({ ":level": null, "level": "info" }));
        assert_eq!(lookup(&map, LEVEL), Some(&Value::Null));
    }

    #[test]
    fn test_missing_key() {
        let map = object(json!({ "file": "STDOUT" }));
        assert_eq!(lookup(&map, ROTATION), None);
    }
}
