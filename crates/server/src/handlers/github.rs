//! GitHub proxy endpoints.
//!
//! Both endpoints take the caller's GitHub token from the `Authorization`
//! header and reject the request before any network call when it is
//! missing. The server never persists the token; a [`GitHubClient`] is
//! built per request.

use axum::extract::State;
use axum::http::HeaderMap;
use axum::http::header::AUTHORIZATION;
use secrecy::SecretString;
use serde::Deserialize;

use repodo_github::{GitHubClient, PageRequest};
use repodo_protocol::RepoPage;

use crate::error::{ApiError, Result};
use crate::extract::{Json, Query};
use crate::state::AppState;

/// Cursor and limit query shared by both endpoints.
#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    limit: Option<u8>,
}

/// Query of `GET /api/github/search`.
///
/// Repeats the page fields instead of flattening [`PageQuery`]: flattened
/// structs go through serde's buffered content, where the urlencoded
/// deserializer can no longer parse `limit` as a number.
#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    query: Option<String>,
    #[serde(default)]
    cursor: Option<String>,
    #[serde(default)]
    limit: Option<u8>,
}

fn bearer_token(headers: &HeaderMap) -> Result<SecretString> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.strip_prefix("Bearer ").unwrap_or(v))
        .filter(|v| !v.is_empty());

    match token {
        Some(token) => Ok(SecretString::from(token.to_string())),
        None => Err(ApiError::Unauthorized(
            "Authentication token is required".to_string(),
        )),
    }
}

impl PageQuery {
    fn into_request(self, default_limit: u8) -> PageRequest {
        PageRequest {
            cursor: self.cursor,
            limit: self.limit.unwrap_or(default_limit),
        }
    }
}

/// `GET /api/github/repositories`: one page of the viewer's repositories,
/// newest-updated first.
pub async fn list_repositories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<PageQuery>,
) -> Result<Json<RepoPage>> {
    let token = bearer_token(&headers)?;
    let client = GitHubClient::new(token, state.github_api_base_url.as_deref())?;
    let page = client
        .viewer_repositories(&query.into_request(state.page_size))
        .await?;
    Ok(Json(page))
}

/// `GET /api/github/search`: one page of repository search results.
pub async fn search_repositories(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<SearchQuery>,
) -> Result<Json<RepoPage>> {
    let token = bearer_token(&headers)?;

    let Some(term) = query.query.as_deref().filter(|q| !q.is_empty()) else {
        return Err(ApiError::bad_request("Search query is required"));
    };

    let page_request = PageQuery {
        cursor: query.cursor,
        limit: query.limit,
    }
    .into_request(state.page_size);

    let client = GitHubClient::new(token, state.github_api_base_url.as_deref())?;
    let page = client.search_repositories(term, &page_request).await?;
    Ok(Json(page))
}
