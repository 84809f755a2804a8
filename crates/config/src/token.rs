//! The on-disk GitHub token store.
//!
//! The token obtained at sign-in is cached locally so later sessions can
//! attach it to the user without re-authenticating. The store writes a
//! single file under the XDG data directory, falling back to the config
//! directory when the data directory is unavailable, and reads happily from
//! either location.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.local/share/repodo/github_token     # Linux, primary
//! ~/.config/repodo/github_token         # fallback
//! ```
//!
//! In memory the token is always a [`SecretString`], so it never shows up
//! in debug output or logs.

use std::fs;
use std::path::PathBuf;

use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument, warn};

use crate::error::{ConfigError, Result};

/// File name the token is stored under.
const TOKEN_FILE_NAME: &str = "github_token";

/// Application directory name inside the data/config dirs.
const APP_DIR: &str = "repodo";

/// Persistent store for the cached GitHub access token.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use repodo_config::TokenStore;
///
/// # fn example() -> repodo_config::Result<()> {
/// let store = TokenStore::new()?;
/// store.save(&SecretString::from("gho_xxx".to_string()))?;
///
/// if let Some(token) = store.load()? {
///     // attach to the session user
/// }
///
/// store.clear()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct TokenStore {
    /// Where the token is written.
    primary: PathBuf,
    /// Read-only fallback checked when the primary file is absent.
    fallback: Option<PathBuf>,
}

impl TokenStore {
    /// Creates a store at the default locations.
    ///
    /// The data directory is the primary location; the config directory is
    /// kept as a fallback. When only one of the two can be determined, that
    /// one becomes the primary with no fallback.
    ///
    /// # Errors
    ///
    /// Returns an error if neither directory can be determined.
    #[instrument]
    pub fn new() -> Result<Self> {
        let data = dirs::data_dir().map(|d| d.join(APP_DIR).join(TOKEN_FILE_NAME));
        let config = dirs::config_dir().map(|d| d.join(APP_DIR).join(TOKEN_FILE_NAME));

        match (data, config) {
            (Some(primary), fallback) => Ok(Self { primary, fallback }),
            (None, Some(primary)) => {
                warn!("data directory unavailable, storing token in config directory");
                Ok(Self {
                    primary,
                    fallback: None,
                })
            }
            (None, None) => Err(ConfigError::NoHomeDirectory),
        }
    }

    /// Creates a store at a custom path. Useful for testing.
    #[must_use]
    pub fn with_path(path: PathBuf) -> Self {
        Self {
            primary: path,
            fallback: None,
        }
    }

    /// Persists the token, overwriting any previous value.
    ///
    /// # Errors
    ///
    /// Returns an error if the parent directory cannot be created or the
    /// file cannot be written.
    #[instrument(skip(self, token))]
    pub fn save(&self, token: &SecretString) -> Result<()> {
        if let Some(parent) = self.primary.parent().filter(|p| !p.exists()) {
            fs::create_dir_all(parent).map_err(|e| ConfigError::TokenStore {
                path: self.primary.clone(),
                source: e,
            })?;
        }

        fs::write(&self.primary, token.expose_secret()).map_err(|e| ConfigError::TokenStore {
            path: self.primary.clone(),
            source: e,
        })?;
        debug!(path = ?self.primary, "token saved");
        Ok(())
    }

    /// Loads the cached token.
    ///
    /// Checks the primary location first, then the fallback. Returns
    /// `Ok(None)` when no token is stored anywhere.
    ///
    /// # Errors
    ///
    /// Returns an error if a token file exists but cannot be read.
    #[instrument(skip(self))]
    pub fn load(&self) -> Result<Option<SecretString>> {
        for path in std::iter::once(&self.primary).chain(self.fallback.as_ref()) {
            match fs::read_to_string(path) {
                Ok(content) => {
                    let trimmed = content.trim();
                    if trimmed.is_empty() {
                        debug!(?path, "token file empty, skipping");
                        continue;
                    }
                    debug!(?path, "token loaded");
                    return Ok(Some(SecretString::from(trimmed.to_string())));
                }
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => {
                    warn!(?path, error = %e, "failed to read token file");
                    return Err(ConfigError::TokenStore {
                        path: path.clone(),
                        source: e,
                    });
                }
            }
        }
        Ok(None)
    }

    /// Removes the stored token from every location.
    ///
    /// Clearing an already-empty store is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing token file cannot be removed.
    #[instrument(skip(self))]
    pub fn clear(&self) -> Result<()> {
        for path in std::iter::once(&self.primary).chain(self.fallback.as_ref()) {
            match fs::remove_file(path) {
                Ok(()) => debug!(?path, "token cleared"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(ConfigError::TokenStore {
                        path: path.clone(),
                        source: e,
                    });
                }
            }
        }
        Ok(())
    }
}
