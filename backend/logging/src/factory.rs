//! Builds sinks from normalized logger definitions.

use logwarden_core::{Error, LoggerDefinition, Result};
use tracing::debug;

use crate::sink::Sink;
use crate::target::Target;

#[derive(Debug, Default, Clone, Copy)]
pub struct SinkFactory;

impl SinkFactory {
    pub fn new() -> Self {
        Self
    }

    /// Open the definition's destination and configure a sink for it.
    ///
    /// File destinations are opened immediately, so an unusable path fails
    /// here rather than on the first write.
    pub fn create(&self, definition: &LoggerDefinition) -> Result<Sink> {
        self.create_for(Target::from_destination(&definition.destination), definition)
    }

    /// Like `create`, but with an explicit target. `Target::Existing` adopts
    /// the given sink instead of opening anything.
    pub fn create_for(&self, target: Target, definition: &LoggerDefinition) -> Result<Sink> {
        let label = target.label();
        let sink = target
            .open(definition.rotation.as_ref(), definition.max_size_or_default())
            .map_err(|source| Error::sink(label, source))?;

        sink.set_level(definition.level);
        sink.set_name(definition.name.clone());
        if let Some(format) = &definition.datetime_format {
            sink.set_datetime_format(Some(format.clone()));
        }

        debug!(
            name = definition.name.as_deref().unwrap_or("<default>"),
            destination = %sink.destination(),
            level = %definition.level,
            "Created log sink"
        );
        Ok(sink)
    }

    /// The stdout sink used when no configured logger claims default.
    pub fn fallback(&self) -> Sink {
        Sink::stdout()
    }
}
