//! Reading and decoding logging configuration files.

use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

use logwarden_core::{Error, Result};
use serde_json::Value;
use tracing::{debug, info};

/// Candidate configuration files, relative to the search root, in the order
/// they are tried.
pub const DEFAULT_FILE_NAMES: [&str; 6] = [
    "logging.yaml",
    "logging.yml",
    "logging.json",
    "config/logging.yaml",
    "config/logging.yml",
    "config/logging.json",
];

/// Serialization format of a configuration document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Yaml,
    Json,
}

impl Format {
    /// Guess the format from a file extension. `None` when ambiguous.
    pub fn from_path(path: &Path) -> Option<Format> {
        let extension = path.extension()?.to_str()?.to_ascii_lowercase();
        match extension.as_str() {
            "yaml" | "yml" => Some(Format::Yaml),
            "json" => Some(Format::Json),
            _ => None,
        }
    }
}

/// First candidate under `root` that exists and can be opened for reading.
pub fn find_default_file(root: &Path) -> Option<PathBuf> {
    DEFAULT_FILE_NAMES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file() && File::open(path).is_ok())
}

/// Read and decode a configuration file.
pub fn read_file(path: &Path) -> Result<Value> {
    let raw = fs::read_to_string(path).map_err(|source| Error::Source {
        path: path.to_path_buf(),
        source,
    })?;
    let value = parse_str(&raw, Format::from_path(path))?;
    info!(path = %path.display(), "Loaded logging configuration");
    Ok(value)
}

/// Read a whole stream and decode it, trying YAML then JSON.
pub fn read_stream(reader: &mut dyn Read) -> Result<Value> {
    let mut raw = String::new();
    reader
        .read_to_string(&mut raw)
        .map_err(|source| Error::Source {
            path: PathBuf::from("<stream>"),
            source,
        })?;
    parse_str(&raw, None)
}

/// Decode configuration text.
///
/// With a known format only that decoder is used. Otherwise YAML is tried
/// first and JSON second; a YAML document that is not a mapping counts as a
/// YAML failure.
pub fn parse_str(raw: &str, format: Option<Format>) -> Result<Value> {
    if raw.trim().is_empty() {
        return Ok(Value::Null);
    }

    match format {
        Some(Format::Yaml) => {
            let value = serde_yaml::from_str::<Value>(raw)
                .map_err(|err| Error::parse("invalid YAML logging configuration", err))?;
            ensure_document(value)
        }
        Some(Format::Json) => {
            let value = serde_json::from_str::<Value>(raw)
                .map_err(|err| Error::parse("invalid JSON logging configuration", err))?;
            ensure_document(value)
        }
        None => {
            match serde_yaml::from_str::<Value>(raw) {
                Ok(value) if is_document(&value) => return Ok(value),
                Ok(_) => debug!("Configuration decoded as a YAML scalar; trying JSON"),
                Err(err) => debug!(error = %err, "Configuration is not YAML; trying JSON"),
            }
            match serde_json::from_str::<Value>(raw) {
                Ok(value) if is_document(&value) => Ok(value),
                Ok(_) => Err(Error::Parse {
                    message: "configuration is neither a YAML nor a JSON mapping".to_string(),
                    source: None,
                }),
                Err(err) => Err(Error::parse(
                    "configuration is not in a recognised format; expected YAML or JSON",
                    err,
                )),
            }
        }
    }
}

fn is_document(value: &Value) -> bool {
    matches!(value, Value::Object(_) | Value::Null)
}

fn ensure_document(value: Value) -> Result<Value> {
    if is_document(&value) {
        Ok(value)
    } else {
        Err(Error::shape("logging configuration must be a mapping"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(Format::from_path(Path::new("a/logging.yml")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("logging.YAML")), Some(Format::Yaml));
        assert_eq!(Format::from_path(Path::new("logging.json")), Some(Format::Json));
        assert_eq!(Format::from_path(Path::new("logging.conf")), None);
        assert_eq!(Format::from_path(Path::new("logging")), None);
    }

    #[test]
    fn test_trial_parse_yaml() {
        let value = parse_str("loggers:\n  - name: main\n    file: STDOUT\n", None).unwrap();
        assert_eq!(value["loggers"][0]["name"], "main");
    }

    #[test]
    fn test_trial_parse_json() {
        let value = parse_str(r#"{"loggers": {"name": "main"}}"#, None).unwrap();
        assert_eq!(value, json!({ "loggers": { "name": "main" } }));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        let err = parse_str("{ loggers: [", None).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_scalar_document_is_rejected() {
        assert!(matches!(parse_str("just words", None), Err(Error::Parse { .. })));
        assert!(matches!(
            parse_str("just words", Some(Format::Yaml)),
            Err(Error::Shape { .. })
        ));
    }

    #[test]
    fn test_forced_json_does_not_fall_back() {
        let err = parse_str("loggers:\n  name: main\n", Some(Format::Json)).unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }

    #[test]
    fn test_blank_document_is_empty() {
        assert_eq!(parse_str("  \n", None).unwrap(), Value::Null);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = read_file(&dir.path().join("nope.yml")).unwrap_err();
        assert!(matches!(err, Error::Source { .. }));
    }

    #[test]
    fn test_read_stream() {
        let mut input = "loggers:\n  name: streamed\n".as_bytes();
        let value = read_stream(&mut input).unwrap();
        assert_eq!(value["loggers"]["name"], "streamed");
    }

    #[test]
    fn test_default_file_order() {
        let dir = TempDir::new().unwrap();
        assert_eq!(find_default_file(dir.path()), None);

        fs::create_dir(dir.path().join("config")).unwrap();
        fs::write(dir.path().join("config/logging.yaml"), "{}").unwrap();
        assert_eq!(
            find_default_file(dir.path()),
            Some(dir.path().join("config/logging.yaml"))
        );

        fs::write(dir.path().join("logging.json"), "{}").unwrap();
        assert_eq!(
            find_default_file(dir.path()),
            Some(dir.path().join("logging.json"))
        );
    }

    #[test]
    fn test_directory_is_not_a_candidate() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("logging.yaml")).unwrap();
        assert_eq!(find_default_file(dir.path()), None);
    }
}
