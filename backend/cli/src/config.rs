use std::path::PathBuf;

/// Environment-driven settings for the CLI itself.
#[derive(Debug, Clone)]
pub struct Config {
    /// Filter for the CLI's own diagnostics on stderr.
    pub log_level: String,
    /// Configuration file used when `--config` is not given.
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "warn".to_string(),
            config_path: None,
        }
    }
}

impl Config {
    /// Read `LOGWARDEN_LOG` and `LOGWARDEN_CONFIG`, falling back to defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            log_level: std::env::var("LOGWARDEN_LOG").unwrap_or(defaults.log_level),
            config_path: std::env::var_os("LOGWARDEN_CONFIG")
                .map(PathBuf::from)
                .or(defaults.config_path),
        }
    }

    /// `--config` wins over `LOGWARDEN_CONFIG`.
    pub fn source_path(&self, flag: Option<PathBuf>) -> Option<PathBuf> {
        flag.or_else(|| self.config_path.clone())
    }
}
