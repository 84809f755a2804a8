//! Favorite repository snapshots.
//!
//! A favorite is a (user, repository-snapshot) association. The snapshot
//! column stores the repository's descriptive fields as JSON, copied at
//! favorite-time; it is not refreshed from GitHub afterwards.
//!
//! Repository-id uniqueness per user is enforced by checking before
//! inserting rather than by a database constraint, matching the observable
//! behaviour of the system this store replaces. Two concurrent adds of the
//! same id through separate stores could still produce duplicates; within
//! one process the connection mutex closes that window.

use rusqlite::{OptionalExtension, params};
use tracing::{debug, instrument};

use repodo_protocol::RepoSnapshot;

use crate::error::{Result, StoreError};
use crate::Store;

impl Store {
    /// Lists a user's favorites in the order they were added.
    ///
    /// A user with no favorites gets an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or a stored snapshot cannot be
    /// decoded.
    #[instrument(skip(self))]
    pub fn favorites_for_user(&self, user_id: &str) -> Result<Vec<RepoSnapshot>> {
        let conn = self.lock();
        let mut stmt =
            conn.prepare("SELECT snapshot FROM favorites WHERE user_id = ?1 ORDER BY rowid")?;
        let raw: Vec<String> = stmt
            .query_map(params![user_id], |row| row.get(0))?
            .collect::<std::result::Result<_, _>>()?;

        raw.iter()
            .map(|json| {
                serde_json::from_str(json).map_err(|e| StoreError::Corrupt {
                    reason: format!("favorite snapshot: {e}"),
                })
            })
            .collect()
    }

    /// Adds a repository snapshot to a user's favorites.
    ///
    /// When the repository id is already favorited, the stored snapshot is
    /// refreshed with the new one instead of inserting a duplicate
    /// (re-favoriting is how displayed metadata catches up with GitHub).
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be serialized or the write
    /// fails.
    #[instrument(skip(self, repo), fields(repo_id = %repo.id))]
    pub fn add_favorite(&self, user_id: &str, repo: &RepoSnapshot) -> Result<()> {
        let snapshot = serde_json::to_string(repo).map_err(|e| StoreError::Corrupt {
            reason: format!("favorite snapshot: {e}"),
        })?;

        let conn = self.lock();
        let exists: Option<i64> = conn
            .query_row(
                "SELECT rowid FROM favorites WHERE user_id = ?1 AND repo_id = ?2",
                params![user_id, repo.id],
                |row| row.get(0),
            )
            .optional()?;

        match exists {
            Some(rowid) => {
                conn.execute(
                    "UPDATE favorites SET snapshot = ?2 WHERE rowid = ?1",
                    params![rowid, snapshot],
                )?;
                debug!("favorite refreshed");
            }
            None => {
                conn.execute(
                    "INSERT INTO favorites (user_id, repo_id, snapshot, added_at)
                     VALUES (?1, ?2, ?3, ?4)",
                    params![
                        user_id,
                        repo.id,
                        snapshot,
                        chrono::Utc::now().to_rfc3339()
                    ],
                )?;
                debug!("favorite added");
            }
        }
        Ok(())
    }

    /// Removes a favorite by repository id, reporting whether it existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    #[instrument(skip(self))]
    pub fn remove_favorite(&self, user_id: &str, repo_id: &str) -> Result<bool> {
        let affected = self.lock().execute(
            "DELETE FROM favorites WHERE user_id = ?1 AND repo_id = ?2",
            params![user_id, repo_id],
        )?;
        debug!(removed = affected > 0, "favorite remove");
        Ok(affected > 0)
    }
}
