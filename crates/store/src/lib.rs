//! Document store for repodo.
//!
//! This crate persists the three collections the application owns: users,
//! todos, and favorite repository snapshots. It is backed by SQLite, with
//! the schema created on open and an in-memory mode for tests.
//!
//! # Overview
//!
//! - [`Store`]: handle over the database connection; all operations hang
//!   off it
//! - [`todos`]: per-user todo CRUD plus bulk clear-completed and demo
//!   seeding
//! - [`favorites`]: per-user favorite snapshots with query-before-insert
//!   uniqueness
//! - [`users`]: account records with opaque password hashes
//! - [`error`]: error types for store operations
//!
//! Validation does not live here: handlers reject bad input before calling
//! the store, and the store applies whatever it is given.
//!
//! # Examples
//!
//! ```
//! use repodo_store::Store;
//!
//! # fn example() -> repodo_store::Result<()> {
//! let store = Store::open_in_memory()?;
//!
//! let todo = store.add_todo("u1", "Buy milk")?;
//! assert!(!todo.completed);
//! assert_eq!(store.todos_for_user("u1")?.len(), 1);
//! # Ok(())
//! # }
//! ```

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::Connection;
use tracing::{debug, instrument};

pub mod error;
pub mod favorites;
pub mod todos;
pub mod users;

pub use error::{Result, StoreError};
pub use users::UserRecord;

/// Handle over the SQLite-backed document store.
///
/// The connection sits behind a mutex, so a `Store` can be shared across
/// request handlers; individual operations serialize on it.
#[derive(Debug)]
pub struct Store {
    conn: Mutex<Connection>,
}

impl Store {
    /// Opens (or creates) the store at the given path.
    ///
    /// `":memory:"` opens a transient in-memory database. Parent
    /// directories are created as needed, and the schema is applied on
    /// open.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or the schema
    /// cannot be created.
    #[instrument]
    pub fn open(path: &str) -> Result<Self> {
        if path == ":memory:" {
            return Self::open_in_memory();
        }

        if let Some(parent) = Path::new(path).parent().filter(|p| !p.as_os_str().is_empty() && !p.exists()) {
            std::fs::create_dir_all(parent).map_err(|e| StoreError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!(path, "opening store");
        let conn = Connection::open(path)?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Opens a transient in-memory store. Used by tests and `":memory:"`
    /// configurations.
    ///
    /// # Errors
    ///
    /// Returns an error if the schema cannot be created.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::init_schema(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn init_schema(conn: &Connection) -> Result<()> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS users (
                uid TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                display_name TEXT,
                avatar_url TEXT,
                password_hash TEXT NOT NULL,
                created_at TEXT NOT NULL
            );

            CREATE TABLE IF NOT EXISTS todos (
                id TEXT PRIMARY KEY,
                user_id TEXT NOT NULL,
                text TEXT NOT NULL,
                completed INTEGER NOT NULL DEFAULT 0,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_todos_user ON todos(user_id);

            -- Repository id uniqueness per user is enforced by
            -- query-before-insert in add_favorite, not by a constraint.
            CREATE TABLE IF NOT EXISTS favorites (
                user_id TEXT NOT NULL,
                repo_id TEXT NOT NULL,
                snapshot TEXT NOT NULL,
                added_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS idx_favorites_user ON favorites(user_id);",
        )?;
        Ok(())
    }

    /// Locks the connection, recovering from a poisoned mutex.
    pub(crate) fn lock(&self) -> MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}
