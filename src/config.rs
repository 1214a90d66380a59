use macro_meals_core::{MalformedVersionPolicy, Platform, PolicySettings};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::remote::scalar_to_string;

/// Source of a configuration value
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfigSource {
    Default,
    File,
    Environment,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::Default => write!(f, "default"),
            ConfigSource::File => write!(f, "file"),
            ConfigSource::Environment => write!(f, "environment"),
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }
}

/// Application configuration with source tracking
#[derive(Debug, Clone, Serialize)]
pub struct Config {
    /// Directory holding local storage (snooze record)
    pub data_dir: ConfigValue<PathBuf>,
    /// YAML file standing in for the remote config service
    pub remote_config_path: ConfigValue<PathBuf>,
    /// Platform whose thresholds apply
    pub platform: ConfigValue<Platform>,
    /// Version of the running app
    pub current_version: ConfigValue<String>,
    /// Hours a "Later" suppresses soft prompts
    pub snooze_hours: ConfigValue<u64>,
    /// Seconds before a required-update prompt reappears
    pub reprompt_seconds: ConfigValue<u64>,
    /// How malformed version strings are handled
    pub malformed_versions: ConfigValue<MalformedVersionPolicy>,
    /// Config file path used (if any)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub config_file: Option<PathBuf>,
}

/// Internal struct for deserializing config file
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ConfigFile {
    data_dir: Option<PathBuf>,
    remote_config_path: Option<PathBuf>,
    platform: Option<Platform>,
    current_version: Option<serde_yaml::Value>,
    snooze_hours: Option<u64>,
    reprompt_seconds: Option<u64>,
    malformed_versions: Option<MalformedVersionPolicy>,
}

impl Config {
    /// Load configuration with priority: env vars > config file > defaults
    pub fn load(config_path: Option<PathBuf>) -> Result<Self, ConfigError> {
        // Start with defaults
        let mut data_dir = ConfigValue::new(Self::default_data_dir(), ConfigSource::Default);
        let mut remote_config_path =
            ConfigValue::new(Self::default_remote_config_path(), ConfigSource::Default);
        let mut platform = ConfigValue::new(Platform::Ios, ConfigSource::Default);
        let mut current_version = ConfigValue::new(
            env!("CARGO_PKG_VERSION").to_string(),
            ConfigSource::Default,
        );
        let mut snooze_hours = ConfigValue::new(24, ConfigSource::Default);
        let mut reprompt_seconds = ConfigValue::new(5, ConfigSource::Default);
        let mut malformed_versions =
            ConfigValue::new(MalformedVersionPolicy::Reject, ConfigSource::Default);
        let mut config_file = None;

        // Try to load from config file
        let path = config_path.unwrap_or_else(Self::default_config_path);
        if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .map_err(|e| ConfigError::ReadError(path.clone(), e))?;
            let file_config: ConfigFile = serde_yaml::from_str(&contents)
                .map_err(|e| ConfigError::ParseError(path.clone(), e))?;

            config_file = Some(path.clone());

            if let Some(dir) = file_config.data_dir {
                data_dir = ConfigValue::new(resolve_relative(&path, dir), ConfigSource::File);
            }
            if let Some(remote) = file_config.remote_config_path {
                remote_config_path =
                    ConfigValue::new(resolve_relative(&path, remote), ConfigSource::File);
            }
            if let Some(value) = file_config.platform {
                platform = ConfigValue::new(value, ConfigSource::File);
            }
            if let Some(raw) = file_config.current_version {
                let value = scalar_to_string("current_version", &raw)
                    .map_err(|e| ConfigError::InvalidValue("current_version", e))?;
                if let Some(value) = value {
                    current_version = ConfigValue::new(value, ConfigSource::File);
                }
            }
            if let Some(value) = file_config.snooze_hours {
                snooze_hours = ConfigValue::new(value, ConfigSource::File);
            }
            if let Some(value) = file_config.reprompt_seconds {
                reprompt_seconds = ConfigValue::new(value, ConfigSource::File);
            }
            if let Some(value) = file_config.malformed_versions {
                malformed_versions = ConfigValue::new(value, ConfigSource::File);
            }
        }

        // Apply environment variable overrides
        if let Ok(dir) = std::env::var("MACROMEALS_DATA_DIR") {
            data_dir = ConfigValue::new(PathBuf::from(dir), ConfigSource::Environment);
        }
        if let Ok(remote) = std::env::var("MACROMEALS_REMOTE_CONFIG") {
            remote_config_path = ConfigValue::new(PathBuf::from(remote), ConfigSource::Environment);
        }
        if let Ok(value) = std::env::var("MACROMEALS_PLATFORM") {
            let parsed = value
                .parse()
                .map_err(|e| ConfigError::InvalidValue("MACROMEALS_PLATFORM", e))?;
            platform = ConfigValue::new(parsed, ConfigSource::Environment);
        }
        if let Ok(value) = std::env::var("MACROMEALS_APP_VERSION") {
            current_version = ConfigValue::new(value, ConfigSource::Environment);
        }

        Ok(Self {
            data_dir,
            remote_config_path,
            platform,
            current_version,
            snooze_hours,
            reprompt_seconds,
            malformed_versions,
            config_file,
        })
    }

    /// Engine settings derived from this configuration.
    pub fn policy_settings(&self) -> PolicySettings {
        let mut settings =
            PolicySettings::new(self.platform.value, self.current_version.value.clone());
        settings.reprompt_interval = Duration::from_secs(self.reprompt_seconds.value);
        settings.malformed_versions = self.malformed_versions.value;
        settings
    }

    pub fn snooze_cooldown(&self) -> Duration {
        Duration::from_secs(self.snooze_hours.value * 60 * 60)
    }

    /// Default config directory (platform-specific):
    /// - Linux: ~/.config/macromeals/
    /// - macOS: ~/Library/Application Support/macromeals/
    /// - Windows: %APPDATA%/macromeals/
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("macromeals")
    }

    /// Default data directory (platform-specific):
    /// - Linux: ~/.local/share/macromeals/
    /// - macOS: ~/Library/Application Support/macromeals/
    /// - Windows: %APPDATA%/macromeals/
    pub fn default_data_dir() -> PathBuf {
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("macromeals")
    }

    /// Default config file path (platform-specific config dir + config.yaml)
    pub fn default_config_path() -> PathBuf {
        Self::default_config_dir().join("config.yaml")
    }

    pub fn default_remote_config_path() -> PathBuf {
        Self::default_config_dir().join("remote_config.yaml")
    }
}

// Relative paths in the config file are relative to the file itself
fn resolve_relative(config_path: &std::path::Path, value: PathBuf) -> PathBuf {
    if value.is_relative() {
        config_path
            .parent()
            .map(|p| p.join(&value))
            .unwrap_or(value)
    } else {
        value
    }
}

#[derive(Debug)]
pub enum ConfigError {
    ReadError(PathBuf, std::io::Error),
    ParseError(PathBuf, serde_yaml::Error),
    InvalidValue(&'static str, String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::ReadError(path, e) => {
                write!(f, "Failed to read config file '{}': {}", path.display(), e)
            }
            ConfigError::ParseError(path, e) => {
                write!(f, "Failed to parse config file '{}': {}", path.display(), e)
            }
            ConfigError::InvalidValue(name, e) => {
                write!(f, "Invalid value for {}: {}", name, e)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
