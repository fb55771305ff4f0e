//! core::config
//!
//! Configuration schema and loading.
//!
//! # Locations
//!
//! The config file is searched in order:
//! 1. `$STATLINE_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/statline/config.toml`
//! 3. `~/.config/statline/config.toml`
//!
//! A missing file means defaults; a malformed file is an error rather than
//! silently ignored.
//!
//! # Example
//!
//! ```toml
//! cache_capacity = 8
//!
//! [icons]
//! ahead = "⇡"
//! behind = "⇣"
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {message}")]
    Read { path: PathBuf, message: String },

    #[error("failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// User configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Maximum repositories kept open in the status cache
    pub cache_capacity: Option<usize>,

    /// Glyph overrides by logical icon name (branch, ahead, behind, staged,
    /// modified, stashed, conflict, tag)
    pub icons: HashMap<String, String>,
}

impl Config {
    /// Load configuration from the first file found, or defaults if none.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a file exists but cannot be read or parsed.
    pub fn load() -> Result<Self, ConfigError> {
        match Self::locate_file() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Find the config file, honoring the search order in the module docs.
    fn locate_file() -> Option<PathBuf> {
        if let Ok(explicit) = std::env::var("STATLINE_CONFIG") {
            return Some(PathBuf::from(explicit));
        }

        if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
            let path = Path::new(&xdg).join("statline/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        let path = dirs::config_dir()?.join("statline/config.toml");
        path.exists().then_some(path)
    }
}
