//! Body and query extractors whose rejections keep the `{error}` shape.
//!
//! Axum's stock `Json` and `Query` answer a malformed body or query string
//! with a plain-text 400, which would be the one place a client cannot read
//! `error` off the response. These wrappers route the rejection through
//! [`ApiError`] instead.

use axum::extract::{FromRequest, FromRequestParts};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::error::ApiError;

/// JSON request body, rejected as an [`ApiError::BadRequest`].
#[derive(FromRequest)]
#[from_request(via(axum::extract::Json), rejection(ApiError))]
pub struct Json<T>(pub T);

impl<T: Serialize> IntoResponse for Json<T> {
    fn into_response(self) -> Response {
        axum::Json(self.0).into_response()
    }
}

/// Query string, rejected as an [`ApiError::BadRequest`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct Query<T>(pub T);
