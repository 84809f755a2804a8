//! Shared application state.

use std::sync::Arc;

use repodo_config::Config;
use repodo_store::Store;

/// State handed to every handler.
///
/// Cloning is cheap; the store sits behind an `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The SQLite-backed document store.
    pub store: Arc<Store>,
    /// Page size used when a GitHub read does not pass an explicit limit.
    pub page_size: u8,
    /// Override for the GitHub API base URL, for tests.
    pub github_api_base_url: Option<String>,
    /// Whether new accounts start with a seeded todo list.
    pub seed_demo_data: bool,
}

impl AppState {
    /// Builds the state from an opened store and the loaded configuration.
    #[must_use]
    pub fn new(store: Store, config: &Config) -> Self {
        Self {
            store: Arc::new(store),
            page_size: config.server.page_size,
            github_api_base_url: config.github.api_base_url.clone(),
            seed_demo_data: config.server.seed_demo_data,
        }
    }
}
