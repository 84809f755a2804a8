//! Error types for GitHub API operations.

/// Errors that can occur during GitHub API operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// An error occurred while calling the GitHub API.
    ///
    /// Covers transport failures and non-2xx responses.
    #[error("GitHub API error: {0}")]
    Api(#[from] octocrab::Error),

    /// The GraphQL response carried an `errors` array.
    ///
    /// GitHub answers 200 for queries that fail at the GraphQL level; the
    /// first error message is surfaced as a single human-readable string.
    #[error("{message}")]
    Graphql {
        /// The first GraphQL error message.
        message: String,
    },

    /// The search query string was empty.
    #[error("search query must not be empty")]
    EmptyQuery,

    /// The response did not contain the expected data shape.
    #[error("malformed GitHub API response: {reason}")]
    MalformedResponse {
        /// What was missing or unexpected.
        reason: String,
    },
}

/// A specialized Result type for GitHub API operations.
pub type Result<T> = std::result::Result<T, Error>;
