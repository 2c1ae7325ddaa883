use std::collections::BTreeSet;
use std::fs;

use logwarden::{ConfigLoader, ConfigSource, Error, Registry, Severity};
use serde_json::{json, Value};
use tempfile::TempDir;

fn names(list: &[&str]) -> BTreeSet<String> {
    list.iter().map(|name| name.to_string()).collect()
}

fn configured(settings: Value) -> Registry {
    let registry = Registry::new();
    registry.configure(Some(settings.into())).unwrap();
    registry
}

fn file_settings() -> Value {
    json!({
        "loggers": [
            { "name": "silent", "file": "STDOUT", "level": "fatal", "default": "yes" },
            { "name": "verbose", "file": "STDERR", "level": "debug" },
        ],
        "aliases": { "class01": "verbose" },
    })
}

#[test]
fn test_stdout_stderr_scenario() {
    let registry = configured(json!({
        "loggers": [
            { "name": "stdout", "file": "STDOUT", "default": true },
            { "name": "stderr", "file": "STDERR" },
        ]
    }));

    assert_eq!(registry.names(), names(&["stdout", "stderr"]));
    assert_eq!(registry.resolve(None), registry.resolve(Some("stdout")));
    assert_ne!(registry.resolve(Some("stdout")), registry.resolve(Some("stderr")));
}

#[test]
fn test_empty_settings() {
    let registry = configured(json!({}));
    assert!(registry.names().is_empty());

    let default = registry.resolve(None);
    assert_eq!(default.destination(), "STDOUT");
    assert!(default.debug("written to stdout"));
}

#[test]
fn test_no_default_marked_logger() {
    let registry = configured(json!({
        "loggers": [
            { "name": "logger01", "file": "STDOUT" },
            { "name": "logger02", "file": "STDOUT" },
        ]
    }));

    let default = registry.resolve(None);
    assert_ne!(default, registry.resolve(Some("logger01")));
    assert_ne!(default, registry.resolve(Some("logger02")));
    assert_ne!(registry.resolve(Some("logger01")), registry.resolve(Some("logger02")));
    assert_eq!(default.level(), Severity::Debug);
}

#[test]
fn test_alias_precedence() {
    let registry = configured(json!({
        "loggers": [
            { "name": "A", "default": true },
            { "name": "B" },
        ],
        "aliases": { "C": "B" },
    }));

    assert_eq!(registry.resolve(Some("C")), registry.resolve(Some("B")));
    assert_ne!(registry.resolve(Some("C")), registry.resolve(None));
}

#[test]
fn test_aliases_are_listed_and_shared() {
    let registry = configured(json!({
        ":loggers": [
            { ":name": "logger01", ":file": "STDOUT" },
            { ":name": "logger02", ":file": "STDOUT" },
        ],
        ":aliases": { "other01": "logger02", "other02": "logger01" },
    }));

    assert_eq!(
        registry.names(),
        names(&["logger01", "logger02", "other01", "other02"])
    );
    assert_eq!(registry.resolve(Some("other01")), registry.resolve(Some("logger02")));
    assert_eq!(registry.resolve(Some("other02")), registry.resolve(Some("logger01")));
    assert_ne!(registry.resolve(Some("other01")), registry.resolve(None));
}

#[test]
fn test_reconfigure_is_idempotent() {
    let registry = Registry::new();
    registry.configure(Some(file_settings().into())).unwrap();
    let first = registry.names();
    let first_alias_shared =
        registry.resolve(Some("class01")) == registry.resolve(Some("verbose"));

    registry.configure(Some(file_settings().into())).unwrap();
    assert_eq!(registry.names(), first);
    assert_eq!(
        registry.resolve(Some("class01")) == registry.resolve(Some("verbose")),
        first_alias_shared
    );
}

#[test]
fn test_reconfigure_replaces_rather_than_merges() {
    let registry = configured(file_settings());
    registry
        .configure(Some(json!({ "loggers": { "name": "fresh" } }).into()))
        .unwrap();
    assert_eq!(registry.names(), names(&["fresh"]));
}

#[test]
fn test_yaml_and_json_files_agree() {
    let dir = TempDir::new().unwrap();
    let settings = file_settings();
    let yaml_path = dir.path().join("logging.yml");
    let json_path = dir.path().join("logging.json");
    fs::write(&yaml_path, serde_yaml::to_string(&settings).unwrap()).unwrap();
    fs::write(&json_path, serde_json::to_string_pretty(&settings).unwrap()).unwrap();

    let from_yaml = Registry::new();
    from_yaml.configure(Some(yaml_path.into())).unwrap();
    let from_json = Registry::new();
    from_json.configure(Some(json_path.into())).unwrap();

    assert_eq!(from_yaml.names(), names(&["silent", "verbose", "class01"]));
    assert_eq!(from_yaml.names(), from_json.names());
    for registry in [&from_yaml, &from_json] {
        assert_eq!(registry.resolve(None), registry.resolve(Some("silent")));
        assert_eq!(registry.resolve(Some("class01")), registry.resolve(Some("verbose")));
        assert_eq!(registry.resolve(None).level(), Severity::Fatal);
    }
}

#[test]
fn test_ambiguous_extension_is_trial_parsed() {
    let dir = TempDir::new().unwrap();
    let yaml = dir.path().join("logging.conf");
    let json = dir.path().join("logging.cfg");
    fs::write(&yaml, "loggers:\n  - name: from_yaml\n").unwrap();
    fs::write(&json, r#"{"loggers": [{"name": "from_json"}]}"#).unwrap();

    let registry = Registry::new();
    registry.configure(Some(yaml.into())).unwrap();
    assert_eq!(registry.names(), names(&["from_yaml"]));
    registry.configure(Some(json.into())).unwrap();
    assert_eq!(registry.names(), names(&["from_json"]));
}

#[test]
fn test_unparseable_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("logging.txt");
    fs::write(&path, "loggers: [ {name: broken").unwrap();

    let registry = configured(json!({ "loggers": { "name": "before" } }));
    let err = registry.configure(Some(path.into())).unwrap_err();
    assert!(matches!(err, Error::Parse { .. }));
    assert_eq!(registry.names(), names(&["before"]));
}

#[test]
fn test_missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let err = Registry::new()
        .configure(Some(dir.path().join("absent.yaml").into()))
        .unwrap_err();
    assert!(matches!(err, Error::Source { .. }));
}

#[test]
fn test_invalid_loggers_shape() {
    let err = Registry::new()
        .configure(Some(json!({ "loggers": "STDOUT" }).into()))
        .unwrap_err();
    assert!(matches!(err, Error::Shape { .. }));
}

#[test]
fn test_stream_source() {
    let registry = Registry::new();
    let reader = Box::new("loggers:\n  name: streamed\n  default: on\n".as_bytes());
    registry.configure(Some(ConfigSource::Stream(reader))).unwrap();
    assert_eq!(registry.names(), names(&["streamed"]));
    assert_eq!(registry.resolve(None), registry.resolve(Some("streamed")));
}

#[test]
fn test_default_file_discovery() {
    let dir = TempDir::new().unwrap();
    fs::create_dir(dir.path().join("config")).unwrap();
    fs::write(
        dir.path().join("config").join("logging.json"),
        serde_json::to_string(&file_settings()).unwrap(),
    )
    .unwrap();

    let registry = Registry::new();
    registry
        .configure_with(&ConfigLoader::with_search_root(dir.path()), None)
        .unwrap();
    assert_eq!(registry.names(), names(&["silent", "verbose", "class01"]));
    assert_ne!(registry.resolve(Some("silent")), registry.resolve(Some("verbose")));
    assert_eq!(registry.resolve(None), registry.resolve(Some("silent")));
}

#[test]
fn test_no_default_file_falls_back_to_stdout() {
    let dir = TempDir::new().unwrap();
    let registry = configured(file_settings());
    registry
        .configure_with(&ConfigLoader::with_search_root(dir.path()), None)
        .unwrap();

    assert!(registry.names().is_empty());
    let default = registry.resolve(None);
    assert_eq!(default.destination(), "STDOUT");
    assert_eq!(registry.resolve(Some("silent")), default);
}
