//! Log sinks for logwarden.
//!
//! Handles severity gating, line formatting, size and time based file
//! rotation, and building sinks from `LoggerDefinition`s.

pub mod bridge;
pub mod factory;
pub mod rotate;
pub mod sink;
pub mod target;

pub use bridge::{install_tracing, level_filter};
pub use factory::SinkFactory;
pub use rotate::SizeRotatingFile;
pub use sink::{BoxedWriter, Sink, DEFAULT_DATETIME_FORMAT};
pub use target::Target;
