//! Configuration loading — TOML file with environment variable overrides.
//!
//! Looks for `hestia.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use serde::Deserialize;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Logging settings.
    pub logging: LoggingConfig,
    /// Threshold-actuator integration settings.
    pub actuator: ActuatorConfig,
    /// Washer integration settings.
    pub washer: WasherConfig,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

/// Threshold-actuator toggles.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ActuatorConfig {
    /// Enable the actuator integration.
    pub enabled: bool,
}

/// Washer entity configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct WasherConfig {
    /// Enable the washer integration.
    pub enabled: bool,
    /// Display name of the washer entity.
    pub name: String,
    /// Seconds between device status polls.
    pub refresh_secs: u64,
}

impl Config {
    /// Load configuration from `hestia.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if a
    /// value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("hestia.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("HESTIA_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.washer.refresh_secs == 0 {
            return Err(ConfigError::Validation(
                "washer.refresh_secs must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "hestiad=info,hestia_app=info,hestia_adapter_actuator=info,hestia_adapter_washer=info".to_string(),
        }
    }
}

impl Default for ActuatorConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl Default for WasherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            name: "Washer".to_string(),
            refresh_secs: 30,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
