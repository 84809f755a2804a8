//! Configuration file discovery, reading and writing.
//!
//! # File Formats
//!
//! Both JSON5 (`.json5`, comments and trailing commas allowed) and plain
//! JSON (`.json`) are accepted on read; files are written back as
//! pretty-printed JSON.
//!
//! # File Locations
//!
//! Configuration is searched in the following order:
//!
//! 1. Local: `./repodo.json5` or `./repodo.json`
//! 2. User: `~/.config/repodo/config.json5` or `~/.config/repodo/config.json`

use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

/// Configuration file names to search for, in priority order.
const CONFIG_FILE_NAMES: &[&str] = &["repodo.json5", "repodo.json"];

/// User config directory name.
const USER_CONFIG_DIR: &str = "repodo";

/// User config file names to search for, in priority order.
const USER_CONFIG_FILE_NAMES: &[&str] = &["config.json5", "config.json"];

/// Finds the configuration file path.
///
/// Searches the local directory first, then the user config directory.
/// Returns `None` when no config file exists anywhere.
#[must_use]
pub fn find_config_file() -> Option<PathBuf> {
    // Try local directory first
    for name in CONFIG_FILE_NAMES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    // Try user config directory
    if let Some(config_dir) = dirs::config_dir() {
        let user_dir = config_dir.join(USER_CONFIG_DIR);
        for name in USER_CONFIG_FILE_NAMES {
            let path = user_dir.join(name);
            if path.exists() {
                return Some(path);
            }
        }
    }

    None
}

/// Returns the user configuration directory, typically `~/.config/repodo/`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn user_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|d| d.join(USER_CONFIG_DIR))
        .ok_or(ConfigError::NoHomeDirectory)
}

/// Reads and parses a configuration file (JSON5 or JSON).
///
/// # Errors
///
/// Returns an error if the file cannot be read or its content cannot be
/// parsed.
pub fn read_config_file<T: serde::de::DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JSON5 parser handles both JSON5 and JSON
    serde_json5::from_str(&content).map_err(ConfigError::from)
}

/// Writes a configuration to a file as pretty-printed JSON.
///
/// Creates parent directories as needed.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created, the value
/// cannot be serialized, or the file cannot be written.
pub fn write_config_file<T: serde::Serialize>(path: impl AsRef<Path>, config: &T) -> Result<()> {
    let path = path.as_ref();

    if let Some(parent) = path.parent().filter(|p| !p.exists()) {
        std::fs::create_dir_all(parent).map_err(|e| ConfigError::WriteFile {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    let content = serde_json::to_string_pretty(config)?;

    std::fs::write(path, content).map_err(|e| ConfigError::WriteFile {
        path: path.to_path_buf(),
        source: e,
    })
}
