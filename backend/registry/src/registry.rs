//! The named-logger registry.

use std::collections::{BTreeSet, HashMap};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use logwarden_config::{Alias, ConfigLoader, ConfigSource, Settings};
use logwarden_core::{Error, LoggerDefinition, Result};
use logwarden_logging::{Sink, SinkFactory, Target};
use tracing::{debug, info};

/// One complete set of sinks produced by a rebuild.
struct Generation {
    named: HashMap<String, Sink>,
    default: Sink,
}

impl Generation {
    fn resolve(&self, name: Option<&str>) -> Sink {
        name.and_then(|name| self.named.get(name))
            .unwrap_or(&self.default)
            .clone()
    }

    fn close(self) {
        for sink in self.named.values() {
            sink.close();
        }
        self.default.close();
    }
}

/// Thread-safe store of named sinks, their aliases, and the default sink.
///
/// A registry starts empty. The first `resolve` on an empty registry
/// installs a single stdout sink as the default, so lookups never fail.
#[derive(Default)]
pub struct Registry {
    // None until the first rebuild, and again after `shutdown`.
    current: RwLock<Option<Generation>>,
    factory: SinkFactory,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The sink registered under `name`, or the default sink when `name` is
    /// `None` or unknown.
    pub fn resolve(&self, name: Option<&str>) -> Sink {
        if let Some(generation) = self.read().as_ref() {
            return generation.resolve(name);
        }

        let mut current = self.write();
        let generation = current.get_or_insert_with(|| {
            debug!("Registry used before configuration; installing default sink");
            Generation {
                named: HashMap::new(),
                default: self.factory.fallback(),
            }
        });
        generation.resolve(name)
    }

    /// Every registered name, aliases included. The default sentinel is not
    /// a name.
    pub fn names(&self) -> BTreeSet<String> {
        self.read()
            .as_ref()
            .map(|generation| generation.named.keys().cloned().collect())
            .unwrap_or_default()
    }

    pub fn is_configured(&self) -> bool {
        self.read().is_some()
    }

    /// Replace the registry contents with sinks built from `definitions`,
    /// then apply `aliases` in order.
    ///
    /// The new state is built aside and swapped in only once every sink has
    /// been created; on error the previous state is left untouched. Sinks of
    /// the replaced state are closed.
    pub fn rebuild(&self, definitions: &[LoggerDefinition], aliases: &[Alias]) -> Result<()> {
        let generation = self.stage(definitions, aliases)?;
        let count = generation.named.len();

        let previous = self.write().replace(generation);
        if let Some(previous) = previous {
            previous.close();
        }

        info!(
            loggers = definitions.len(),
            aliases = aliases.len(),
            names = count,
            "Logger registry rebuilt"
        );
        Ok(())
    }

    /// Load settings from `source` and rebuild. `None` searches the working
    /// directory for a default configuration file.
    pub fn configure(&self, source: Option<ConfigSource>) -> Result<()> {
        self.configure_with(&ConfigLoader::default(), source)
    }

    /// Like `configure`, with a caller-supplied loader.
    pub fn configure_with(
        &self,
        loader: &ConfigLoader,
        source: Option<ConfigSource>,
    ) -> Result<()> {
        let settings = loader.load(source)?;
        self.apply(&settings)
    }

    /// Rebuild from already parsed settings.
    pub fn apply(&self, settings: &Settings) -> Result<()> {
        self.rebuild(&settings.loggers, &settings.aliases)
    }

    /// Point the sink behind `name` at `target` in place.
    ///
    /// Nothing is rebuilt: every name sharing that sink, and every handle a
    /// caller already holds, writes to the new destination. On error the
    /// sink keeps its current writer.
    pub fn retarget(&self, name: Option<&str>, target: Target) -> Result<()> {
        let destination = target.label();
        let sink = self.resolve(name);
        sink.set_target(target).map_err(|source| Error::sink(destination, source))?;

        debug!(
            name = name.unwrap_or("<default>"),
            destination = %sink.destination(),
            "Logger retargeted"
        );
        Ok(())
    }

    /// Close every sink and return to the unconfigured state.
    pub fn shutdown(&self) {
        if let Some(generation) = self.write().take() {
            generation.close();
            debug!("Logger registry shut down");
        }
    }

    fn stage(&self, definitions: &[LoggerDefinition], aliases: &[Alias]) -> Result<Generation> {
        let mut named = HashMap::new();
        let mut default: Option<Sink> = None;

        for definition in definitions {
            let sink = self.factory.create(definition)?;
            // A nameless definition is stored under the default key itself.
            if definition.is_default || definition.name.is_none() {
                default = Some(sink.clone());
            }
            if let Some(name) = &definition.name {
                named.insert(name.clone(), sink);
            }
        }

        for alias in aliases {
            let known = alias
                .target
                .as_deref()
                .and_then(|target| named.get(target))
                .cloned();
            let sink = match known {
                Some(sink) => sink,
                None => {
                    if let Some(target) = &alias.target {
                        debug!(
                            alias = %alias.name,
                            target = %target,
                            "Alias target is not a configured logger; using the default"
                        );
                    }
                    default
                        .get_or_insert_with(|| self.factory.fallback())
                        .clone()
                }
            };
            named.insert(alias.name.clone(), sink);
        }

        Ok(Generation {
            named,
            default: default.unwrap_or_else(|| self.factory.fallback()),
        })
    }

    fn read(&self) -> RwLockReadGuard<'_, Option<Generation>> {
        self.current.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Option<Generation>> {
        self.current.write().unwrap_or_else(PoisonError::into_inner)
    }
}
