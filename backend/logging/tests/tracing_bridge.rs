use std::fs::{self, File};

use logwarden_core::Severity;
use logwarden_logging::{install_tracing, Sink};
use tempfile::TempDir;

// Installs the process-wide subscriber, so it lives in its own test binary.
#[test]
fn test_install_tracing_routes_events_into_sink() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("tracing.log");
    let sink = Sink::new(
        path.display().to_string(),
        Box::new(File::create(&path).unwrap()),
    );
    sink.set_level(Severity::Warn);

    assert!(install_tracing(&sink));
    assert!(!install_tracing(&sink));

    tracing::info!("below the sink level");
    tracing::warn!(disk = "/var", "disk nearly full");
    sink.flush().unwrap();

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("disk nearly full"));
    assert!(contents.contains("disk=\"/var\""));
    assert!(!contents.contains("below the sink level"));
}
