//! Favorite-repository endpoints.

use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};

use repodo_protocol::RepoSnapshot;

use crate::error::{ApiError, Result};
use crate::extract::{Json, Query};
use crate::handlers::todos::UserIdQuery;
use crate::state::AppState;

/// Body of `POST /api/favorites`.
#[derive(Debug, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
    #[serde(default)]
    repository: Option<RepoSnapshot>,
}

/// `?userId=&repositoryId=` query for the remove endpoint.
#[derive(Debug, Deserialize)]
pub struct RemoveFavoriteQuery {
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
    #[serde(default, rename = "repositoryId")]
    repository_id: Option<String>,
}

/// `GET /api/favorites?userId=`: the user's snapshots in insertion order.
pub async fn list_favorites(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<RepoSnapshot>>> {
    let user_id = query.require()?;
    Ok(Json(state.store.favorites_for_user(user_id)?))
}

/// `POST /api/favorites`: add (or refresh) a snapshot.
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(body): Json<AddFavoriteRequest>,
) -> Result<Json<Value>> {
    let (Some(user_id), Some(repository)) = (
        body.user_id.as_deref().filter(|s| !s.is_empty()),
        body.repository.as_ref(),
    ) else {
        return Err(ApiError::bad_request("User id and repository are required"));
    };

    state.store.add_favorite(user_id, repository)?;
    Ok(Json(json!({ "success": true })))
}

/// `DELETE /api/favorites?userId=&repositoryId=`: remove by repository id.
pub async fn remove_favorite(
    State(state): State<AppState>,
    Query(query): Query<RemoveFavoriteQuery>,
) -> Result<Json<Value>> {
    let (Some(user_id), Some(repository_id)) = (
        query.user_id.as_deref().filter(|s| !s.is_empty()),
        query.repository_id.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::bad_request(
            "User id and repository id are required",
        ));
    };

    if state.store.remove_favorite(user_id, repository_id)? {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::NotFound("Favorite not found".to_string()))
    }
}
