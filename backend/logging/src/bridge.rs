//! Routes `tracing` output into a `Sink`.

use logwarden_core::Severity;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;

use crate::sink::Sink;

impl<'a> MakeWriter<'a> for Sink {
    type Writer = Sink;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

/// The `tracing` filter that lets through what the sink would accept.
///
/// `tracing` has no level above ERROR, so `Fatal` maps to ERROR and
/// `Unknown` silences everything.
pub fn level_filter(level: Severity) -> LevelFilter {
    match level {
        Severity::Debug => LevelFilter::DEBUG,
        Severity::Info => LevelFilter::INFO,
        Severity::Warn => LevelFilter::WARN,
        Severity::Error | Severity::Fatal => LevelFilter::ERROR,
        Severity::Unknown => LevelFilter::OFF,
    }
}

/// Install a global fmt subscriber writing into `sink`.
///
/// Returns false if a global subscriber was already set.
pub fn install_tracing(sink: &Sink) -> bool {
    tracing_subscriber::fmt()
        .with_writer(sink.clone())
        .with_ansi(false)
        .with_max_level(level_filter(sink.level()))
        .try_init()
        .is_ok()
}
