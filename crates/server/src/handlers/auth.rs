//! Email/password authentication endpoints.

use axum::extract::State;
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;

use crate::error::{ApiError, Result};
use crate::extract::Json;
use crate::password::{hash_password, verify_password};
use crate::state::AppState;

/// Minimum accepted password length, in characters.
const MIN_PASSWORD_LEN: usize = 6;

/// Body of `POST /api/auth`.
#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: Option<String>,
    #[serde(default)]
    action: Option<String>,
    #[serde(default, rename = "displayName")]
    display_name: Option<String>,
}

/// `POST /api/auth`: sign up or log in, selected by `action`.
pub async fn authenticate(
    State(state): State<AppState>,
    Json(body): Json<AuthRequest>,
) -> Result<Json<Value>> {
    let (Some(email), Some(password)) = (
        body.email.as_deref().filter(|s| !s.is_empty()),
        body.password.as_deref().filter(|s| !s.is_empty()),
    ) else {
        return Err(ApiError::bad_request("Email and password are required"));
    };

    let user = match body.action.as_deref() {
        Some("signup") => signup(&state, email, password, body.display_name.as_deref())?,
        Some("login") => login(&state, email, password)?,
        _ => return Err(ApiError::bad_request("Invalid action")),
    };

    Ok(Json(json!({
        "user": { "uid": user.uid, "email": user.email }
    })))
}

/// `GET /api/auth`: logout. Sessions are client-held, so the server only
/// acknowledges.
pub async fn logout() -> Json<Value> {
    Json(json!({ "success": true }))
}

fn signup(
    state: &AppState,
    email: &str,
    password: &str,
    display_name: Option<&str>,
) -> Result<repodo_protocol::User> {
    // The bare minimum of an address shape: a local part and a domain.
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ApiError::bad_request("Invalid email address"));
    };
    if local.is_empty() || domain.is_empty() {
        return Err(ApiError::bad_request("Invalid email address"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(ApiError::bad_request("Password is too weak"));
    }
    if state.store.user_by_email(email)?.is_some() {
        return Err(ApiError::bad_request("This email is already registered"));
    }

    let hash = hash_password(password)?;
    let user = state.store.create_user(email, &hash, display_name)?;
    debug!(uid = %user.uid, "account created");

    if state.seed_demo_data {
        let seeded = state.store.seed_demo_todos(&user.uid)?;
        debug!(seeded, "demo todos seeded for new account");
    }
    Ok(user)
}

fn login(state: &AppState, email: &str, password: &str) -> Result<repodo_protocol::User> {
    // Unknown email and wrong password answer identically, so responses
    // cannot be used to enumerate accounts.
    let Some(record) = state.store.user_by_email(email)? else {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    };
    if !verify_password(password, &record.password_hash)? {
        return Err(ApiError::Unauthorized("Invalid credentials".to_string()));
    }
    Ok(record.user)
}
