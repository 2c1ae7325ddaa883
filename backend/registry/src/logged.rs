//! Attach a named logger to a type.

use logwarden_core::Result;
use logwarden_logging::{Sink, Target};

use crate::global::global;
use crate::registry::Registry;

/// Types that log through a registry, the process-wide one unless
/// `registry` is overridden.
///
/// Override `LOGGER` to use a named logger; the default uses the default
/// logger. The sink is looked up on every call, so reconfiguring the
/// registry is picked up immediately.
///
/// ```no_run
/// use logwarden::Logged;
///
/// struct Billing;
///
/// impl Logged for Billing {
///     const LOGGER: Option<&'static str> = Some("billing");
/// }
///
/// Billing.log().info("invoice sent");
/// ```
pub trait Logged {
    const LOGGER: Option<&'static str> = None;

    fn registry(&self) -> &Registry {
        global()
    }

    fn log(&self) -> Sink {
        self.registry().resolve(Self::LOGGER)
    }

    /// Redirect this type's logger in place. Other names sharing the same
    /// sink follow it.
    fn set_log_target(&self, target: Target) -> Result<()> {
        self.registry().retarget(Self::LOGGER, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::fs;
    use tempfile::TempDir;

    struct Billing {
        registry: Registry,
    }

    impl Logged for Billing {
        const LOGGER: Option<&'static str> = Some("billing");

        fn registry(&self) -> &Registry {
            &self.registry
        }
    }

    struct Anonymous<'a>(&'a Registry);

    impl Logged for Anonymous<'_> {
        fn registry(&self) -> &Registry {
            self.0
        }
    }

    fn billing() -> Billing {
        let registry = Registry::new();
        registry
            .configure(Some(
                json!({
                    "loggers": [{ "name": "billing", "file": "STDOUT", "level": "info" }],
                    "aliases": { "payments": "billing" },
                })
                .into(),
            ))
            .unwrap();
        Billing { registry }
    }

    #[test]
    fn test_log_resolves_named_and_default_loggers() {
        let billing = billing();
        assert_eq!(billing.log(), billing.registry.resolve(Some("billing")));

        let anonymous = Anonymous(&billing.registry);
        assert_eq!(anonymous.log(), billing.registry.resolve(None));
        assert_ne!(anonymous.log(), billing.log());
    }

    #[test]
    fn test_set_log_target_moves_aliases_too() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("billing.log");
        let billing = billing();

        billing.set_log_target(Target::File(path.clone())).unwrap();
        billing
            .registry
            .resolve(Some("payments"))
            .info("invoice settled");
        billing.log().debug("below level");

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO -- billing: invoice settled"));
        assert!(!contents.contains("below level"));
    }
}
