use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::error::ConfigError;
use crate::history::DEFAULT_HISTORY_CAPACITY;

const MAX_HISTORY_CAPACITY: usize = 10_000;

/// Runtime configuration. Scoring constants are deliberately absent; they
/// live as `const`s next to the formulas that use them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct MaiaConfig {
    #[serde(default)]
    pub history: HistoryConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Record classified states for trend display
    pub enabled: bool,
    /// Maximum retained states; oldest evicted first
    pub capacity: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
    /// Request body limit in bytes
    pub max_body_bytes: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// `EnvFilter` directive string
    pub filter: String,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            capacity: DEFAULT_HISTORY_CAPACITY,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:8787".to_string(),
            max_body_bytes: 64 * 1024,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "maia_core=info,maia_server=info".to_string(),
        }
    }
}

impl MaiaConfig {
    /// Load configuration from TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path)?;
        let config: MaiaConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    /// Environment variables are prefixed with MAIA_
    /// Example: MAIA_HISTORY_CAPACITY=200
    pub fn from_file_with_env<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut config = Self::from_file(path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        Ok(config)
    }

    /// Load from multiple sources with priority:
    /// 1. Environment variables (highest priority)
    /// 2. User config file (if exists)
    /// 3. Default config file
    /// 4. Built-in defaults (lowest priority)
    pub fn load_layered(
        default_path: Option<&Path>,
        user_path: Option<&Path>,
    ) -> Result<Self, ConfigError> {
        let mut config = MaiaConfig::default();

        if let Some(path) = default_path {
            if path.exists() {
                config = Self::from_file(path)?;
            }
        }

        // Sections missing from the user file keep the values loaded so far.
        // Keys missing inside a present section fall back to built-in defaults.
        if let Some(path) = user_path {
            if path.exists() {
                let content = fs::read_to_string(path)?;
                let user: toml::Table = toml::from_str(&content)?;
                config = config.merge(user)?;
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Overlay the sections present in `table` onto `self`.
    fn merge(mut self, table: toml::Table) -> Result<Self, ConfigError> {
        if let Some(section) = table.get("history") {
            self.history = section.clone().try_into()?;
        }
        if let Some(section) = table.get("server") {
            self.server = section.clone().try_into()?;
        }
        if let Some(section) = table.get("logging") {
            self.logging = section.clone().try_into()?;
        }
        Ok(self)
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) -> Result<(), ConfigError> {
        use std::env;

        if let Ok(val) = env::var("MAIA_HISTORY_ENABLED") {
            self.history.enabled = val.parse().map_err(|_| {
                ConfigError::Validation("Invalid MAIA_HISTORY_ENABLED".to_string())
            })?;
        }
        if let Ok(val) = env::var("MAIA_HISTORY_CAPACITY") {
            self.history.capacity = val.parse().map_err(|_| {
                ConfigError::Validation("Invalid MAIA_HISTORY_CAPACITY".to_string())
            })?;
        }
        if let Ok(val) = env::var("MAIA_SERVER_BIND_ADDR") {
            self.server.bind_addr = val;
        }
        if let Ok(val) = env::var("MAIA_SERVER_MAX_BODY_BYTES") {
            self.server.max_body_bytes = val.parse().map_err(|_| {
                ConfigError::Validation("Invalid MAIA_SERVER_MAX_BODY_BYTES".to_string())
            })?;
        }
        if let Ok(val) = env::var("MAIA_LOG_FILTER") {
            self.logging.filter = val;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history.capacity == 0 || self.history.capacity > MAX_HISTORY_CAPACITY {
            return Err(ConfigError::Validation(format!(
                "history.capacity must be in [1, {}]",
                MAX_HISTORY_CAPACITY
            )));
        }

        if self.server.bind_addr.parse::<std::net::SocketAddr>().is_err() {
            return Err(ConfigError::Validation(format!(
                "server.bind_addr is not a socket address: {}",
                self.server.bind_addr
            )));
        }
        if self.server.max_body_bytes == 0 {
            return Err(ConfigError::Validation(
                "server.max_body_bytes must be > 0".to_string(),
            ));
        }

        if self.logging.filter.trim().is_empty() {
            return Err(ConfigError::Validation(
                "logging.filter must not be empty".to_string(),
            ));
        }

        Ok(())
    }

    /// Export configuration to TOML string
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Save configuration to file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        fs::write(path, self.to_toml_string()?)?;
        Ok(())
    }
}
