//! User accounts.
//!
//! The store keeps the argon2 password hash alongside the account fields;
//! hashing and verification themselves live in the server crate.

use rusqlite::{OptionalExtension, Row, params};
use tracing::{debug, instrument};
use uuid::Uuid;

use repodo_protocol::User;

use crate::error::Result;
use crate::Store;

/// A stored account: the wire-shaped user plus its password hash.
///
/// The hash never leaves the store/server boundary.
#[derive(Debug, Clone)]
pub struct UserRecord {
    /// The account as exposed to clients.
    pub user: User,
    /// Argon2 PHC-format password hash.
    pub password_hash: String,
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<UserRecord> {
    Ok(UserRecord {
        user: User {
            uid: row.get(0)?,
            email: row.get(1)?,
            display_name: row.get(2)?,
            avatar_url: row.get(3)?,
            github_token: None,
        },
        password_hash: row.get(4)?,
    })
}

impl Store {
    /// Creates an account with a fresh UUID v4 uid.
    ///
    /// The caller is expected to have checked for a duplicate email first
    /// (handlers do, to produce their own message); a race past that check
    /// still trips the unique index and surfaces as a database error.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails, including on duplicate email.
    #[instrument(skip(self, password_hash))]
    pub fn create_user(
        &self,
        email: &str,
        password_hash: &str,
        display_name: Option<&str>,
    ) -> Result<User> {
        let user = User {
            uid: Uuid::new_v4().to_string(),
            email: Some(email.to_string()),
            display_name: display_name.map(str::to_string),
            ..Default::default()
        };

        self.lock().execute(
            "INSERT INTO users (uid, email, display_name, avatar_url, password_hash, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            params![
                user.uid,
                email,
                user.display_name,
                user.avatar_url,
                password_hash,
                chrono::Utc::now().to_rfc3339()
            ],
        )?;
        debug!(uid = %user.uid, "user created");
        Ok(user)
    }

    /// Looks an account up by email.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    #[instrument(skip(self))]
    pub fn user_by_email(&self, email: &str) -> Result<Option<UserRecord>> {
        Ok(self
            .lock()
            .query_row(
                "SELECT uid, email, display_name, avatar_url, password_hash
                 FROM users WHERE email = ?1",
                params![email],
                row_to_record,
            )
            .optional()?)
    }
}
