use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Boxed cause carried by parse failures.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for configuring and building loggers.
#[derive(Debug, Error)]
pub enum Error {
    /// The settings structure does not have the expected shape.
    #[error("invalid logging configuration: {message}")]
    Shape { message: String },

    /// The configuration content could not be decoded as YAML or JSON.
    #[error("unable to parse logging configuration: {message}")]
    Parse {
        message: String,
        #[source]
        source: Option<Cause>,
    },

    /// A configuration file could not be opened or read.
    #[error("unable to read logging configuration from {}", path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A sink destination could not be opened or created.
    #[error("unable to create log sink for '{destination}'")]
    Sink {
        destination: String,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub fn shape(message: impl Into<String>) -> Self {
        Error::Shape {
            message: message.into(),
        }
    }

    pub fn parse<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Error::Parse {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    pub fn sink(destination: impl Into<String>, source: io::Error) -> Self {
        Error::Sink {
            destination: destination.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
