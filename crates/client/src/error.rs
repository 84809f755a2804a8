//! Client error types.

use reqwest::StatusCode;

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors surfaced by the API client and the session layer.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a response (connection refused, DNS,
    /// timeout).
    #[error("connection error: {0}")]
    Http(#[from] reqwest::Error),

    /// The base URL or a joined path is not a valid URL.
    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server answered with a non-2xx status. `message` is the `error`
    /// field of the response body.
    #[error("{message}")]
    Api {
        /// HTTP status of the response.
        status: StatusCode,
        /// The server's `error` message.
        message: String,
    },

    /// A 2xx response body did not parse as the expected shape.
    #[error("unexpected response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Rejected client-side before any network call.
    #[error("Please enter a search term")]
    EmptySearch,

    /// The local token store failed.
    #[error(transparent)]
    TokenStore(#[from] repodo_config::ConfigError),
}

impl ClientError {
    /// The HTTP status of an API-level error, if this is one.
    #[must_use]
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_displays_the_server_message() {
        let err = ClientError::Api {
            status: StatusCode::NOT_FOUND,
            message: "Todo not found".to_string(),
        };
        assert_eq!(err.to_string(), "Todo not found");
        assert_eq!(err.status(), Some(StatusCode::NOT_FOUND));
    }

    #[test]
    fn empty_search_message_is_user_facing() {
        assert_eq!(
            ClientError::EmptySearch.to_string(),
            "Please enter a search term"
        );
    }
}
