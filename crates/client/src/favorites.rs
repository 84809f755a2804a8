//! Optimistic favorites view.
//!
//! The view applies adds and removes to its local list first, issues the
//! remote call, and rolls the local change back when the call fails. No
//! queue and no automatic retry; the compensating action is the whole
//! recovery story.

use async_trait::async_trait;
use tracing::{debug, warn};

use repodo_protocol::RepoSnapshot;

use crate::client::ApiClient;
use crate::error::Result;

/// The remote half of the favorites view.
///
/// [`ApiClient`] is the production implementation; tests substitute a
/// scripted one.
#[async_trait]
pub trait FavoritesBackend {
    /// Lists the user's snapshots.
    async fn list(&self, user_id: &str) -> Result<Vec<RepoSnapshot>>;
    /// Adds (or refreshes) a snapshot.
    async fn add(&self, user_id: &str, repository: &RepoSnapshot) -> Result<()>;
    /// Removes a snapshot by repository id.
    async fn remove(&self, user_id: &str, repository_id: &str) -> Result<()>;
}

#[async_trait]
impl FavoritesBackend for ApiClient {
    async fn list(&self, user_id: &str) -> Result<Vec<RepoSnapshot>> {
        self.favorites(user_id).await
    }

    async fn add(&self, user_id: &str, repository: &RepoSnapshot) -> Result<()> {
        self.add_favorite(user_id, repository).await
    }

    async fn remove(&self, user_id: &str, repository_id: &str) -> Result<()> {
        self.remove_favorite(user_id, repository_id).await
    }
}

/// A user's favorites with optimistic local updates.
pub struct FavoritesView<B: FavoritesBackend> {
    backend: B,
    user_id: String,
    favorites: Vec<RepoSnapshot>,
}

impl<B: FavoritesBackend> FavoritesView<B> {
    /// Creates an empty view for a user.
    pub fn new(backend: B, user_id: impl Into<String>) -> Self {
        Self {
            backend,
            user_id: user_id.into(),
            favorites: Vec::new(),
        }
    }

    /// Replaces the local list with the server's.
    ///
    /// # Errors
    ///
    /// Returns an error if the list call fails; the local list is kept.
    pub async fn load(&mut self) -> Result<()> {
        self.favorites = self.backend.list(&self.user_id).await?;
        debug!(count = self.favorites.len(), "favorites loaded");
        Ok(())
    }

    /// The current local list, in insertion order.
    #[must_use]
    pub fn favorites(&self) -> &[RepoSnapshot] {
        &self.favorites
    }

    /// Whether a repository id is in the local list.
    #[must_use]
    pub fn is_favorite(&self, repository_id: &str) -> bool {
        self.favorites.iter().any(|r| r.id == repository_id)
    }

    /// Adds a favorite, optimistically.
    ///
    /// The snapshot appears in the local list immediately and is removed
    /// again if the remote call fails.
    ///
    /// # Errors
    ///
    /// Returns the remote error after rolling back.
    pub async fn add(&mut self, repository: RepoSnapshot) -> Result<()> {
        let id = repository.id.clone();
        self.favorites.push(repository.clone());

        if let Err(err) = self.backend.add(&self.user_id, &repository).await {
            warn!(repo_id = %id, error = %err, "add failed, rolling back");
            self.favorites.retain(|r| r.id != id);
            return Err(err);
        }
        Ok(())
    }

    /// Removes a favorite, optimistically.
    ///
    /// The snapshot leaves the local list immediately and is restored if
    /// the remote call fails. Removing an id that is not in the local list
    /// is a no-op.
    ///
    /// # Errors
    ///
    /// Returns the remote error after rolling back.
    pub async fn remove(&mut self, repository_id: &str) -> Result<()> {
        let Some(index) = self.favorites.iter().position(|r| r.id == repository_id) else {
            return Ok(());
        };
        let removed = self.favorites.remove(index);

        if let Err(err) = self.backend.remove(&self.user_id, repository_id).await {
            warn!(repo_id = %repository_id, error = %err, "remove failed, rolling back");
            self.favorites.insert(index, removed);
            return Err(err);
        }
        Ok(())
    }

    /// Adds or removes based on current local membership.
    ///
    /// # Errors
    ///
    /// Returns the remote error after rolling back.
    pub async fn toggle(&mut self, repository: RepoSnapshot) -> Result<()> {
        if self.is_favorite(&repository.id) {
            self.remove(&repository.id).await
        } else {
            self.add(repository).await
        }
    }
}
