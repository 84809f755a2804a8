//! Core configuration struct and loading logic.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Default HTTP bind address.
const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";

/// Default page size for GitHub repository pagination.
const DEFAULT_PAGE_SIZE: u8 = 10;

/// The main configuration struct for the repodo application.
///
/// # Examples
///
/// ```
/// use repodo_config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
/// assert_eq!(config.server.page_size, 10);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// HTTP server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// GitHub API settings.
    #[serde(default)]
    pub github: GithubConfig,

    /// Storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
}

/// HTTP server settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    /// Default page size for cursor-paginated GitHub reads.
    ///
    /// Used when a request does not pass an explicit `limit`. Must be
    /// between 1 and 100 (GitHub's per-page maximum).
    #[serde(default = "default_page_size")]
    pub page_size: u8,

    /// Whether to seed a starter todo list for users with no todos.
    #[serde(default)]
    pub seed_demo_data: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            page_size: default_page_size(),
            seed_demo_data: false,
        }
    }
}

/// GitHub API settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GithubConfig {
    /// Override for the GitHub API base URL.
    ///
    /// When unset, the client talks to `https://api.github.com`. Tests
    /// point this at a local stub.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
}

/// Storage settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the SQLite database file.
    ///
    /// `":memory:"` opens a transient in-memory database. When unset, the
    /// database lives under the XDG data directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub database_path: Option<String>,
}

impl StorageConfig {
    /// Resolves the effective database path.
    ///
    /// # Errors
    ///
    /// Returns an error if no path is configured and the data directory
    /// cannot be determined.
    pub fn resolve_database_path(&self) -> Result<String> {
        if let Some(path) = &self.database_path {
            return Ok(path.clone());
        }
        let data_dir = dirs::data_dir().ok_or(ConfigError::NoHomeDirectory)?;
        let path: PathBuf = data_dir.join("repodo").join("repodo.db");
        Ok(path.to_string_lossy().into_owned())
    }
}

fn default_bind_addr() -> String {
    DEFAULT_BIND_ADDR.to_string()
}

fn default_page_size() -> u8 {
    DEFAULT_PAGE_SIZE
}

impl Config {
    /// Creates a new default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads configuration from the default file locations.
    ///
    /// Searches `./repodo.json5`, `./repodo.json`, then the user config
    /// directory. Returns the defaults when no file is found.
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be
    /// read, parsed, or validated.
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => Ok(Self::default()),
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let config: Config = read_config_file(path)?;
        config.validate()?;
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the page size is out of range or the bind
    /// address cannot be parsed as a socket address.
    ///
    /// # Examples
    ///
    /// ```
    /// use repodo_config::Config;
    ///
    /// let mut config = Config::default();
    /// assert!(config.validate().is_ok());
    ///
    /// config.server.page_size = 0;
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if !(1..=100).contains(&self.server.page_size) {
            return Err(ConfigError::InvalidPageSize {
                value: self.server.page_size,
            });
        }
        if let Err(e) = self.server.bind_addr.parse::<std::net::SocketAddr>() {
            return Err(ConfigError::InvalidBindAddr {
                addr: self.server.bind_addr.clone(),
                reason: e.to_string(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
        assert_eq!(config.server.page_size, 10);
        assert!(!config.server.seed_demo_data);
        assert!(config.github.api_base_url.is_none());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_rejects_zero_page_size() {
        let mut config = Config::default();
        config.server.page_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_unparseable_bind_addr() {
        let mut config = Config::default();
        config.server.bind_addr = "not-an-address".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn deserialize_with_defaults() {
        let config: Config = serde_json5::from_str("{}").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn deserialize_partial() {
        let config: Config =
            serde_json5::from_str(r#"{ server: { page_size: 25 } }"#).unwrap();
        assert_eq!(config.server.page_size, 25);
        assert_eq!(config.server.bind_addr, "127.0.0.1:8080");
    }

    #[test]
    fn load_from_json5_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repodo.json5");
        std::fs::write(
            &path,
            r#"
            {
                // local development settings
                server: { bind_addr: "127.0.0.1:9090", page_size: 20 },
                github: { api_base_url: "http://127.0.0.1:4000" },
                storage: { database_path: ":memory:" },
            }
            "#,
        )
        .unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.server.bind_addr, "127.0.0.1:9090");
        assert_eq!(config.server.page_size, 20);
        assert_eq!(
            config.github.api_base_url.as_deref(),
            Some("http://127.0.0.1:4000")
        );
        assert_eq!(config.storage.database_path.as_deref(), Some(":memory:"));
    }

    #[test]
    fn save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.json");

        let mut original = Config::default();
        original.server.page_size = 42;
        original.storage.database_path = Some(":memory:".to_string());

        original.save_to(&path).unwrap();
        let loaded = Config::load_from(&path).unwrap();

        assert_eq!(original, loaded);
    }

    #[test]
    fn load_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("repodo.json");
        std::fs::write(&path, r#"{"server": {"page_size": 200}}"#).unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn resolve_database_path_prefers_explicit() {
        let storage = StorageConfig {
            database_path: Some(":memory:".to_string()),
        };
        assert_eq!(storage.resolve_database_path().unwrap(), ":memory:");
    }
}
