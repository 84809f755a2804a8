//! Configuration management for the repodo application.
//!
//! This crate handles loading, validating, and persisting configuration,
//! plus the local token store that caches the GitHub access token between
//! sessions.
//!
//! # Overview
//!
//! The crate is organized into the following modules:
//!
//! - [`config`]: Core configuration struct and loading logic
//! - [`persistence`]: Config file discovery, reading and writing
//! - [`token`]: The on-disk GitHub token store
//! - [`error`]: Error types for configuration operations
//!
//! # Configuration Sources (Priority)
//!
//! Configuration is loaded from the first file found, in order:
//!
//! 1. Local config (`./repodo.json5` or `./repodo.json`)
//! 2. User config (`~/.config/repodo/config.json5` or `.json`)
//! 3. Built-in defaults
//!
//! # Token Store
//!
//! The GitHub token obtained at sign-in is cached on disk so later sessions
//! can attach it without re-authenticating. The store writes to the XDG
//! data directory, falling back to the config directory when the data
//! directory is unavailable. In memory the token is always a
//! [`secrecy::SecretString`].
//!
//! # Examples
//!
//! ```no_run
//! use repodo_config::Config;
//!
//! # fn example() -> repodo_config::Result<()> {
//! let config = Config::load()?;
//! println!("listening on {}", config.server.bind_addr);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod error;
pub mod persistence;
pub mod token;

// Re-export primary types at crate root for convenience
pub use config::{Config, GithubConfig, ServerConfig, StorageConfig};
pub use error::{ConfigError, Result};
pub use token::TokenStore;
