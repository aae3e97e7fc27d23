//! Page configuration.
//!
//! Describes which widgets to mount and where. The default configuration
//! reproduces the original demo page: three counters and the logo spinner.

use serde::{Deserialize, Serialize};
use tally_ui::{CounterOptions, SpinnerOptions};
use thiserror::Error;

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// File name used under the user's config directory
pub const CONFIG_FILE_NAME: &str = "page.json";

/// Log level setting for the application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(self) -> log::LevelFilter {
        self.to_level().to_level_filter()
    }

    pub fn to_level(self) -> log::Level {
        match self {
            LogLevel::Error => log::Level::Error,
            LogLevel::Warn => log::Level::Warn,
            LogLevel::Info => log::Level::Info,
            LogLevel::Debug => log::Level::Debug,
            LogLevel::Trace => log::Level::Trace,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid page config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported config version {found} (supported: {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// A counter to mount into the element matching `container`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CounterMount {
    pub container: String,
    #[serde(default)]
    pub options: CounterOptions,
}

impl CounterMount {
    pub fn new(container: impl Into<String>, options: CounterOptions) -> Self {
        Self {
            container: container.into(),
            options,
        }
    }
}

/// The spinner to mount into the element matching `container`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpinnerMount {
    pub container: String,
    #[serde(default)]
    pub options: SpinnerOptions,
}

/// Everything needed to set up a page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageConfig {
    /// Version of the configuration file format
    #[serde(default = "default_version")]
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    #[serde(default)]
    pub counters: Vec<CounterMount>,

    #[serde(default)]
    pub spinner: Option<SpinnerMount>,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            counters: vec![
                CounterMount::new("#counter-1", CounterOptions::range(-20.0, 0.0)),
                CounterMount::new("#counter-2", CounterOptions::range(-10.0, 10.0)),
                CounterMount::new("#counter-3", CounterOptions::range(0.0, 20.0)),
            ],
            spinner: Some(SpinnerMount {
                container: ".logo".to_string(),
                options: SpinnerOptions::default(),
            }),
        }
    }
}

impl PageConfig {
    /// Parse and version-check a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        if config.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_VERSION,
            });
        }
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::{Path, PathBuf};

    use super::{CONFIG_FILE_NAME, ConfigError, PageConfig};

    impl PageConfig {
        /// `<config dir>/tally/page.json`, if the platform has a config dir
        pub fn default_path() -> Option<PathBuf> {
            dirs::config_dir().map(|dir| dir.join("tally").join(CONFIG_FILE_NAME))
        }

        pub fn load(path: &Path) -> Result<Self, ConfigError> {
            let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            })?;
            Self::from_json(&json)
        }

        pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
            let io_error = |source| ConfigError::Io {
                path: path.display().to_string(),
                source,
            };
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(io_error)?;
            }
            std::fs::write(path, self.to_json()?).map_err(io_error)
        }

        /// Load `path` if given, else the default config file if it exists, else
        /// the built-in defaults.
        pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
            if let Some(path) = path {
                return Self::load(path);
            }
            match Self::default_path() {
                Some(path) if path.exists() => Self::load(&path),
                _ => Ok(Self::default()),
            }
        }
    }
}
