//! GitHub API client implementation.
//!
//! This module provides the [`GitHubClient`] struct wrapping octocrab, and
//! [`PageRequest`] describing the cursor/limit pair both read operations
//! take.

use octocrab::Octocrab;
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, instrument};

use repodo_protocol::RepoPage;

use crate::error::{Error, Result};
use crate::query::{
    GraphQlResponse, SEARCH_REPOSITORIES_QUERY, SearchData, VIEWER_REPOSITORIES_QUERY, ViewerData,
};

/// Default page size when a request does not specify a limit.
pub const DEFAULT_PAGE_SIZE: u8 = 10;

/// GitHub's maximum `first` value for connection queries.
const MAX_PAGE_SIZE: u8 = 100;

/// Cursor and page-size pair for a paginated read.
///
/// # Examples
///
/// ```
/// use repodo_github::PageRequest;
///
/// let first = PageRequest::first_page(10);
/// assert!(first.cursor.is_none());
///
/// let next = PageRequest {
///     cursor: Some("Y3Vyc29yOjI=".to_string()),
///     limit: 10,
/// };
/// assert_eq!(next.effective_limit(), 10);
/// ```
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Opaque cursor to resume after, `None` for the first page.
    pub cursor: Option<String>,
    /// Requested page size; 0 means "use the default".
    pub limit: u8,
}

impl PageRequest {
    /// A first-page request with the given page size.
    #[must_use]
    pub fn first_page(limit: u8) -> Self {
        Self {
            cursor: None,
            limit,
        }
    }

    /// Returns the page size clamped to GitHub's accepted range.
    ///
    /// 0 falls back to [`DEFAULT_PAGE_SIZE`]; anything above 100 is capped.
    #[must_use]
    pub fn effective_limit(&self) -> u8 {
        match self.limit {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        }
    }
}

/// GitHub API client for repository reads.
///
/// All operations require authentication; construct the client with the
/// token obtained at sign-in. Tokens are stored as [`SecretString`] to
/// prevent accidental logging.
///
/// # Examples
///
/// ```no_run
/// use secrecy::SecretString;
/// use repodo_github::{GitHubClient, PageRequest};
///
/// # async fn example() -> repodo_github::Result<()> {
/// let token = SecretString::from("gho_xxx".to_string());
/// let client = GitHubClient::new(token, None)?;
///
/// let page = client
///     .search_repositories("web framework", &PageRequest::first_page(10))
///     .await?;
/// println!("{} matches", page.total_count);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct GitHubClient {
    /// The underlying octocrab client.
    inner: Octocrab,
}

impl GitHubClient {
    /// Creates a new authenticated GitHub client.
    ///
    /// # Arguments
    ///
    /// * `token` - The GitHub access token to authenticate with.
    /// * `api_base_url` - Override for the API base URL; `None` targets
    ///   `https://api.github.com`. Tests point this at a local stub.
    ///
    /// # Errors
    ///
    /// Returns an error if the octocrab client fails to initialize.
    #[instrument(skip(token), fields(custom_base = api_base_url.is_some()))]
    pub fn new(token: SecretString, api_base_url: Option<&str>) -> Result<Self> {
        debug!("creating authenticated GitHub client");
        let mut builder =
            Octocrab::builder().personal_token(token.expose_secret().to_string());
        if let Some(base) = api_base_url {
            builder = builder.base_uri(base).map_err(Error::Api)?;
        }
        let inner = builder.build().map_err(Error::Api)?;
        Ok(Self { inner })
    }

    /// Fetches one page of the authenticated viewer's repositories,
    /// ordered by last update, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Api`] for transport or non-2xx failures, or
    /// [`Error::Graphql`] when GitHub reports a GraphQL-level error (for
    /// example an expired token).
    #[instrument(skip(self))]
    pub async fn viewer_repositories(&self, page: &PageRequest) -> Result<RepoPage> {
        let limit = page.effective_limit();
        debug!(limit, cursor = ?page.cursor, "fetching viewer repositories");

        let payload = serde_json::json!({
            "query": VIEWER_REPOSITORIES_QUERY,
            "variables": {
                "first": limit,
                "after": page.cursor,
            },
        });

        let response: GraphQlResponse<ViewerData> =
            self.inner.graphql(&payload).await.map_err(Error::Api)?;
        let page: RepoPage = response.into_data()?.viewer.repositories.into();
        debug!(
            count = page.repositories.len(),
            total = page.total_count,
            "fetched viewer repositories"
        );
        Ok(page)
    }

    /// Searches repositories matching `query`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQuery`] without touching the network when the
    /// query string is empty or whitespace, [`Error::Api`] for transport
    /// failures, or [`Error::Graphql`] for GraphQL-level errors.
    #[instrument(skip(self))]
    pub async fn search_repositories(&self, query: &str, page: &PageRequest) -> Result<RepoPage> {
        if query.trim().is_empty() {
            return Err(Error::EmptyQuery);
        }

        let limit = page.effective_limit();
        debug!(limit, cursor = ?page.cursor, "searching repositories");

        let payload = serde_json::json!({
            "query": SEARCH_REPOSITORIES_QUERY,
            "variables": {
                "queryString": query,
                "first": limit,
                "after": page.cursor,
            },
        });

        let response: GraphQlResponse<SearchData> =
            self.inner.graphql(&payload).await.map_err(Error::Api)?;
        let page: RepoPage = response.into_data()?.search.into();
        debug!(
            count = page.repositories.len(),
            total = page.total_count,
            "search complete"
        );
        Ok(page)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> GitHubClient {
        let token = SecretString::from("gho_fake_token_for_testing".to_string());
        GitHubClient::new(token, None).unwrap()
    }

    #[test]
    fn effective_limit_defaults_when_zero() {
        let page = PageRequest::first_page(0);
        assert_eq!(page.effective_limit(), DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn effective_limit_caps_at_github_maximum() {
        let page = PageRequest::first_page(200);
        assert_eq!(page.effective_limit(), 100);
    }

    #[test]
    fn effective_limit_passes_through_in_range() {
        let page = PageRequest::first_page(25);
        assert_eq!(page.effective_limit(), 25);
    }

    #[tokio::test]
    async fn empty_search_query_rejected_before_network() {
        let client = test_client();

        let err = client
            .search_repositories("   ", &PageRequest::first_page(10))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::EmptyQuery));
    }

    #[tokio::test]
    async fn client_with_custom_base_url() {
        let token = SecretString::from("gho_fake".to_string());
        let client = GitHubClient::new(token, Some("http://127.0.0.1:4000"));
        assert!(client.is_ok());
    }
}
