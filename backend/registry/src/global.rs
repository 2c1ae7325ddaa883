//! The process-wide registry.
//!
//! Libraries that do not want to thread a `Registry` handle around can use
//! these functions; they all operate on one lazily created instance.

use std::collections::BTreeSet;

use logwarden_config::ConfigSource;
use logwarden_core::Result;
use logwarden_logging::{Sink, Target};
use once_cell::sync::Lazy;

use crate::registry::Registry;

static GLOBAL: Lazy<Registry> = Lazy::new(Registry::new);

pub fn global() -> &'static Registry {
    &GLOBAL
}

/// Reconfigure the process-wide registry.
pub fn configure(source: Option<ConfigSource>) -> Result<()> {
    GLOBAL.configure(source)
}

/// Look up a logger in the process-wide registry.
pub fn logger(name: Option<&str>) -> Sink {
    GLOBAL.resolve(name)
}

pub fn names() -> BTreeSet<String> {
    GLOBAL.names()
}

/// Redirect a logger of the process-wide registry in place.
pub fn retarget(name: Option<&str>, target: Target) -> Result<()> {
    GLOBAL.retarget(name, target)
}
