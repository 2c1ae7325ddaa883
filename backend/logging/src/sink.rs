//! Severity-gated log sink.
//!
//! A `Sink` is a clonable handle; every clone writes through the same
//! destination, so several registry names can share one sink.

use std::fmt::{self, Write as _};
use std::io::{self, Write};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Local;
use logwarden_core::{Severity, DEFAULT_MAX_SIZE};

use crate::target::Target;

/// Timestamp format used when a sink has no explicit `datetime_format`.
pub const DEFAULT_DATETIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Any writer a sink can own.
pub type BoxedWriter = Box<dyn Write + Send>;

#[derive(Clone)]
pub struct Sink {
    inner: Arc<SinkInner>,
}

struct SinkInner {
    state: Mutex<SinkState>,
}

struct SinkState {
    destination: String,
    name: Option<String>,
    level: Severity,
    datetime_format: Option<String>,
    // None once the sink has been closed.
    writer: Option<BoxedWriter>,
}

impl Sink {
    /// Wrap an already opened writer. `destination` is only used for display.
    pub fn new(destination: impl Into<String>, writer: BoxedWriter) -> Self {
        Self {
            inner: Arc::new(SinkInner {
                state: Mutex::new(SinkState {
                    destination: destination.into(),
                    name: None,
                    level: Severity::Debug,
                    datetime_format: None,
                    writer: Some(writer),
                }),
            }),
        }
    }

    /// A sink bound to standard output at `Debug` level.
    pub fn stdout() -> Self {
        Self::new(logwarden_core::STDOUT, Box::new(io::stdout()))
    }

    /// True when both handles refer to the same sink.
    pub fn ptr_eq(a: &Sink, b: &Sink) -> bool {
        Arc::ptr_eq(&a.inner, &b.inner)
    }

    pub fn destination(&self) -> String {
        self.lock().destination.clone()
    }

    pub fn name(&self) -> Option<String> {
        self.lock().name.clone()
    }

    /// Set the program name written into every record.
    pub fn set_name(&self, name: Option<String>) {
        self.lock().name = name;
    }

    pub fn level(&self) -> Severity {
        self.lock().level
    }

    pub fn set_level(&self, level: Severity) {
        self.lock().level = level;
    }

    pub fn datetime_format(&self) -> Option<String> {
        self.lock().datetime_format.clone()
    }

    pub fn set_datetime_format(&self, format: Option<String>) {
        self.lock().datetime_format = format;
    }

    /// Whether a record of `severity` would be written.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        severity >= self.lock().level
    }

    pub fn is_closed(&self) -> bool {
        self.lock().writer.is_none()
    }

    /// Write one formatted record. Returns false when the level gate
    /// filtered it out.
    pub fn log(&self, severity: Severity, message: impl fmt::Display) -> bool {
        if !self.is_enabled(severity) {
            return false;
        }
        // Rendered unlocked: a message may itself log through this sink.
        let message = message.to_string();
        let mut state = self.lock();
        let line = format_record(&state, severity, &message);
        emit(&mut state, line.as_bytes());
        true
    }

    pub fn debug(&self, message: impl fmt::Display) -> bool {
        self.log(Severity::Debug, message)
    }

    pub fn info(&self, message: impl fmt::Display) -> bool {
        self.log(Severity::Info, message)
    }

    pub fn warn(&self, message: impl fmt::Display) -> bool {
        self.log(Severity::Warn, message)
    }

    pub fn error(&self, message: impl fmt::Display) -> bool {
        self.log(Severity::Error, message)
    }

    pub fn fatal(&self, message: impl fmt::Display) -> bool {
        self.log(Severity::Fatal, message)
    }

    pub fn unknown(&self, message: impl fmt::Display) -> bool {
        self.log(Severity::Unknown, message)
    }

    /// Write bytes as-is, bypassing formatting and the level gate.
    pub fn write_raw(&self, bytes: &[u8]) -> io::Result<()> {
        let mut state = self.lock();
        match state.writer.as_mut() {
            Some(writer) => {
                writer.write_all(bytes)?;
                writer.flush()
            }
            None => Err(closed()),
        }
    }

    pub fn flush(&self) -> io::Result<()> {
        match self.lock().writer.as_mut() {
            Some(writer) => writer.flush(),
            None => Ok(()),
        }
    }

    /// Swap the destination in place. Every clone of this sink, and so every
    /// registry name sharing it, writes to `writer` from now on.
    ///
    /// The previous writer is flushed and dropped. A closed sink is reopened.
    pub fn replace_writer(&self, destination: impl Into<String>, writer: BoxedWriter) {
        let previous = {
            let mut state = self.lock();
            state.destination = destination.into();
            state.writer.replace(writer)
        };
        if let Some(mut previous) = previous {
            if let Err(err) = previous.flush() {
                eprintln!("log writing failed. {err}");
            }
        }
    }

    /// Open `target` and make it this sink's destination. Files are opened
    /// for appending without rotation.
    pub fn set_target(&self, target: Target) -> io::Result<()> {
        let destination = target.label();
        let writer = target.into_writer(None, DEFAULT_MAX_SIZE)?;
        self.replace_writer(destination, writer);
        Ok(())
    }

    /// Flush and release the destination. Later writes are dropped.
    pub fn close(&self) {
        let mut state = self.lock();
        if let Some(mut writer) = state.writer.take() {
            if let Err(err) = writer.flush() {
                eprintln!("log writing failed. {err}");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SinkState> {
        self.inner
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

fn format_record(state: &SinkState, severity: Severity, message: &dyn fmt::Display) -> String {
    let label = severity.label();
    let mut line = String::with_capacity(64);
    let _ = write!(line, "{}, [", &label[..1]);

    let now = Local::now();
    let format = state
        .datetime_format
        .as_deref()
        .unwrap_or(DEFAULT_DATETIME_FORMAT);
    let mark = line.len();
    if write!(line, "{}", now.format(format)).is_err() {
        line.truncate(mark);
        let _ = write!(line, "{}", now.format(DEFAULT_DATETIME_FORMAT));
    }

    let _ = writeln!(
        line,
        " #{}] {:>5} -- {}: {}",
        std::process::id(),
        label,
        state.name.as_deref().unwrap_or(""),
        message
    );
    line
}

fn emit(state: &mut SinkState, bytes: &[u8]) {
    let Some(writer) = state.writer.as_mut() else {
        return;
    };
    if let Err(err) = writer.write_all(bytes).and_then(|_| writer.flush()) {
        eprintln!("log writing failed. {err}");
    }
}

fn closed() -> io::Error {
    io::Error::new(io::ErrorKind::BrokenPipe, "log sink is closed")
}

/// Lets `write!` and `tracing` writers append raw text to a sink.
impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_raw(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Sink::flush(self)
    }
}

impl PartialEq for Sink {
    fn eq(&self, other: &Self) -> bool {
        Sink::ptr_eq(self, other)
    }
}

impl Eq for Sink {}

impl fmt::Debug for Sink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.lock();
        f.debug_struct("Sink")
            .field("destination", &state.destination)
            .field("name", &state.name)
            .field("level", &state.level)
            .field("closed", &state.writer.is_none())
            .finish()
    }
}
