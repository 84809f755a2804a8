//! Todo CRUD endpoints.

use axum::extract::{Path, State};
use serde::Deserialize;
use serde_json::{Value, json};

use repodo_protocol::{Todo, TodoId, TodoPatch};

use crate::error::{ApiError, Result};
use crate::extract::{Json, Query};
use crate::state::AppState;

/// `?userId=` query for the list and bulk-delete endpoints.
#[derive(Debug, Deserialize)]
pub struct UserIdQuery {
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
}

impl UserIdQuery {
    pub(crate) fn require(&self) -> Result<&str> {
        match self.user_id.as_deref() {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ApiError::bad_request("User id is required")),
        }
    }
}

/// Body of `POST /api/todos`.
#[derive(Debug, Deserialize)]
pub struct CreateTodoRequest {
    #[serde(default, rename = "userId")]
    user_id: Option<String>,
    #[serde(default)]
    text: Option<String>,
}

/// `GET /api/todos?userId=`: the user's todos in insertion order.
pub async fn list_todos(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Vec<Todo>>> {
    let user_id = query.require()?;
    Ok(Json(state.store.todos_for_user(user_id)?))
}

/// `POST /api/todos`: create a todo. Nothing is written when either field
/// is missing or empty.
pub async fn create_todo(
    State(state): State<AppState>,
    Json(body): Json<CreateTodoRequest>,
) -> Result<Json<Todo>> {
    let (Some(user_id), Some(text)) = (
        body.user_id.as_deref().filter(|s| !s.is_empty()),
        body.text.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::bad_request("User id and text are required"));
    };

    Ok(Json(state.store.add_todo(user_id, text)?))
}

/// `PUT /api/todos/{id}`: apply a partial update.
pub async fn update_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<TodoPatch>,
) -> Result<Json<Todo>> {
    if patch.is_empty() {
        return Err(ApiError::bad_request(
            "At least one field is required for update",
        ));
    }

    // A malformed id cannot address any todo.
    let Ok(id) = id.parse::<TodoId>() else {
        return Err(ApiError::NotFound("Todo not found".to_string()));
    };

    match state.store.update_todo(id, &patch)? {
        Some(todo) => Ok(Json(todo)),
        None => Err(ApiError::NotFound("Todo not found".to_string())),
    }
}

/// `DELETE /api/todos/{id}`: delete one todo.
pub async fn delete_todo(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Value>> {
    let parsed = id
        .parse::<TodoId>()
        .map_err(|_| ApiError::NotFound("Todo not found".to_string()))?;

    if state.store.delete_todo(parsed)? {
        Ok(Json(json!({ "success": true, "id": id })))
    } else {
        Err(ApiError::NotFound("Todo not found".to_string()))
    }
}

/// `DELETE /api/todos/completed?userId=`: remove the completed subset.
pub async fn clear_completed(
    State(state): State<AppState>,
    Query(query): Query<UserIdQuery>,
) -> Result<Json<Value>> {
    let user_id = query.require()?;
    let count = state.store.clear_completed_todos(user_id)?;
    Ok(Json(json!({ "success": true, "count": count })))
}
