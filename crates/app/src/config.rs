//! Runtime configuration from environment variables.

use std::path::PathBuf;

use antiposta_application::DEFAULT_APP_NAME;
use antiposta_infrastructure::default_user_agent;
use antiposta_ui::DEFAULT_HISTORY_LIMIT;
use thiserror::Error;

/// Overrides the data directory.
pub const ENV_DATA_DIR: &str = "ANTIPOSTA_DATA_DIR";
/// Overrides the storage key prefix.
pub const ENV_APP_NAME: &str = "ANTIPOSTA_APP_NAME";
/// Log filter used when `RUST_LOG` is unset.
pub const ENV_LOG: &str = "ANTIPOSTA_LOG";
/// Number of history entries kept.
pub const ENV_HISTORY_LIMIT: &str = "ANTIPOSTA_HISTORY_LIMIT";
/// `User-Agent` sent with every request.
pub const ENV_USER_AGENT: &str = "ANTIPOSTA_USER_AGENT";
/// Keep everything in memory.
pub const ENV_EPHEMERAL: &str = "ANTIPOSTA_EPHEMERAL";

/// Errors raised while reading configuration.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable holds a value that cannot be parsed.
    #[error("{name} has invalid value '{value}': {reason}")]
    InvalidValue {
        /// Variable name
        name: &'static str,
        /// Offending value
        value: String,
        /// What was expected
        reason: &'static str,
    },

    /// No data directory was configured and none could be derived.
    #[error("cannot determine a data directory; set {ENV_DATA_DIR}")]
    NoDataDir,
}

/// Settings of one run of the binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Directory holding `storage.json`
    pub data_dir: PathBuf,
    /// Storage key prefix
    pub app_name: String,
    /// Default log filter
    pub log_level: String,
    /// History entries kept
    pub history_limit: usize,
    /// `User-Agent` header value
    pub user_agent: String,
    /// Use an in-memory store
    pub ephemeral: bool,
}

impl AppConfig {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns an error if a variable is malformed or no data directory can
    /// be determined.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok(), dirs::config_dir())
    }

    /// Reads the configuration through `lookup`, with `config_dir` as the
    /// platform configuration directory.
    ///
    /// # Errors
    ///
    /// See [`AppConfig::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
        config_dir: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let ephemeral = get(ENV_EPHEMERAL)
            .map(|v| parse_bool(ENV_EPHEMERAL, &v))
            .transpose()?
            .unwrap_or(false);

        let data_dir = match get(ENV_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => match config_dir {
                Some(dir) => dir.join(DEFAULT_APP_NAME),
                None if ephemeral => PathBuf::new(),
                None => return Err(ConfigError::NoDataDir),
            },
        };

        let history_limit = match get(ENV_HISTORY_LIMIT) {
            Some(v) => v.trim().parse().map_err(|_| ConfigError::InvalidValue {
                name: ENV_HISTORY_LIMIT,
                value: v.clone(),
                reason: "expected a non-negative integer",
            })?,
            None => DEFAULT_HISTORY_LIMIT,
        };

        Ok(Self {
            data_dir,
            app_name: get(ENV_APP_NAME).unwrap_or_else(|| DEFAULT_APP_NAME.to_string()),
            log_level: get(ENV_LOG).unwrap_or_else(|| "info".to_string()),
            history_limit,
            user_agent: get(ENV_USER_AGENT).unwrap_or_else(default_user_agent),
            ephemeral,
        })
    }
}

fn parse_bool(name: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            name,
            value: value.to_string(),
            reason: "expected true or false",
        }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)], config_dir: Option<&str>) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned(), config_dir.map(PathBuf::from))
    }

    #[test]
    fn test_defaults() {
        let config = load(&[], Some("/home/u/.config")).unwrap();

        assert_eq!(
            config,
            AppConfig {
                data_dir: PathBuf::from("/home/u/.config/antiposta"),
                app_name: "antiposta".to_string(),
                log_level: "info".to_string(),
                history_limit: 100,
                user_agent: default_user_agent(),
                ephemeral: false,
            }
        );
    }

    #[test]
    fn test_overrides() {
        let config = load(
            &[
                (ENV_DATA_DIR, "/tmp/store"),
                (ENV_APP_NAME, "curlgui"),
                (ENV_LOG, "debug"),
                (ENV_HISTORY_LIMIT, "5"),
                (ENV_USER_AGENT, "antiposta-test/1"),
                (ENV_EPHEMERAL, "yes"),
            ],
            None,
        )
        .unwrap();

        assert_eq!(config.data_dir, PathBuf::from("/tmp/store"));
        assert_eq!(config.app_name, "curlgui");
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.history_limit, 5);
        assert_eq!(config.user_agent, "antiposta-test/1");
        assert!(config.ephemeral);
    }

    #[test]
    fn test_invalid_values_are_reported() {
        assert!(matches!(
            load(&[(ENV_HISTORY_LIMIT, "lots")], Some("/c")),
            Err(ConfigError::InvalidValue {
                name: ENV_HISTORY_LIMIT,
                ..
            })
        ));
        assert!(matches!(
            load(&[(ENV_EPHEMERAL, "maybe")], Some("/c")),
            Err(ConfigError::InvalidValue { .. })
        ));
    }

    #[test]
    fn test_missing_data_dir() {
        assert_eq!(load(&[], None), Err(ConfigError::NoDataDir));
        assert!(load(&[(ENV_EPHEMERAL, "1")], None).is_ok());
    }
}
