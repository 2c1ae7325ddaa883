use std::fmt;
use std::io::{self, Write};
use std::path::PathBuf;

use logwarden_core::{Rotation, STDERR, STDOUT};

use crate::rotate::{time_rotating, SizeRotatingFile};
use crate::sink::{BoxedWriter, Sink};

/// Where a sink writes.
pub enum Target {
    Stdout,
    Stderr,
    File(PathBuf),
    /// Any caller-supplied writer; `label` is used for display.
    Stream {
        label: String,
        writer: Box<dyn Write + Send>,
    },
    /// An already built sink that should be adopted rather than wrapped.
    Existing(Sink),
}

impl Target {
    /// Resolve a destination string from a logger definition.
    ///
    /// Only the exact tokens `STDOUT` and `STDERR` name the standard
    /// streams; anything else is a file path.
    pub fn from_destination(destination: &str) -> Target {
        match destination {
            STDOUT => Target::Stdout,
            STDERR => Target::Stderr,
            path => Target::File(PathBuf::from(path)),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Target::Stdout => STDOUT.to_string(),
            Target::Stderr => STDERR.to_string(),
            Target::File(path) => path.display().to_string(),
            Target::Stream { label, .. } => label.clone(),
            Target::Existing(sink) => sink.destination(),
        }
    }

    /// Open the destination as a fresh sink. Rotation only applies to files.
    pub(crate) fn open(self, rotation: Option<&Rotation>, max_size: u64) -> io::Result<Sink> {
        if let Target::Existing(sink) = self {
            return Ok(sink);
        }
        let label = self.label();
        let writer = self.into_writer(rotation, max_size)?;
        Ok(Sink::new(label, writer))
    }

    /// The raw writer behind this target. An existing sink has no writer of
    /// its own to hand out.
    pub(crate) fn into_writer(
        self,
        rotation: Option<&Rotation>,
        max_size: u64,
    ) -> io::Result<BoxedWriter> {
        Ok(match self {
            Target::Stdout => Box::new(io::stdout()),
            Target::Stderr => Box::new(io::stderr()),
            Target::Stream { writer, .. } => writer,
            Target::Existing(sink) => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("sink '{}' cannot be used as a writer", sink.destination()),
                ))
            }
            Target::File(path) => match rotation {
                Some(Rotation::Frequency(token)) => Box::new(time_rotating(&path, token)?),
                Some(Rotation::Count(keep)) => {
                    Box::new(SizeRotatingFile::open(path, *keep, max_size)?)
                }
                None => Box::new(SizeRotatingFile::open(path, 0, max_size)?),
            },
        })
    }
}

impl fmt::Debug for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Target({})", self.label())
    }
}
