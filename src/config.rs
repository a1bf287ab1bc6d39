//! Persistent configuration loaded from a TOML file.
//!
//! The default location is `~/.config/curvedcalc/config.toml` on Linux.
//! A missing file is not an error; a malformed one is reported and ignored.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::items::DEFAULT_HISTORY_LIMIT;
use crate::ui::ThemeKind;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Calculator configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Config {
    /// Theme at startup.
    pub theme: ThemeKind,
    /// Maximum number of history entries kept, at most 50.
    pub history_limit: usize,
    /// Copy each result to the clipboard after `=`.
    pub copy_on_equals: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: ThemeKind::Dark,
            history_limit: DEFAULT_HISTORY_LIMIT,
            copy_on_equals: false,
        }
    }
}

impl Config {
    /// Returns the platform-specific configuration directory.
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("curvedcalc"))
    }

    /// Returns the full path to the default config file.
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load from `path`, or from the default location when `None`.
    ///
    /// Falls back to `Config::default()` on any failure.
    pub fn load(path: Option<&Path>) -> Self {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match Self::config_path() {
                Some(path) => path,
                None => {
                    debug!("Could not determine config directory");
                    return Self::default();
                }
            },
        };

        if !path.exists() {
            debug!("No config file found at {:?}", path);
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                debug!("Loaded config from {:?}", path);
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }
}
