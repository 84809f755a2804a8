//! API error type and response mapping.
//!
//! Every failure leaving a handler becomes `{error: "..."}` JSON with a
//! conventional status code, so clients can always read `error` off a
//! non-2xx body.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::warn;

/// Result type for handlers.
pub type Result<T> = std::result::Result<T, ApiError>;

/// An error surfaced to API clients.
///
/// The display string of each variant is exactly the `error` field of the
/// response body.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// 400: the request is missing or misusing a field.
    #[error("{0}")]
    BadRequest(String),

    /// 401: missing or unusable credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// 404: the addressed record does not exist.
    #[error("{0}")]
    NotFound(String),

    /// 500: anything the client cannot fix.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    /// Shorthand for a 400 with a fixed message.
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            warn!(error = %self, "request failed");
        }
        let body = serde_json::json!({ "error": self.to_string() });
        (status, Json(body)).into_response()
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<axum::extract::rejection::QueryRejection> for ApiError {
    fn from(rejection: axum::extract::rejection::QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<repodo_store::StoreError> for ApiError {
    fn from(err: repodo_store::StoreError) -> Self {
        Self::Internal(err.to_string())
    }
}

impl From<repodo_github::Error> for ApiError {
    fn from(err: repodo_github::Error) -> Self {
        match err {
            repodo_github::Error::EmptyQuery => Self::BadRequest(err.to_string()),
            // Transport, non-2xx and GraphQL-level failures all surface as
            // a single human-readable message.
            other => Self::Internal(other.to_string()),
        }
    }
}
