//! GitHub API adapter for repodo.
//!
//! This crate translates GitHub's paginated GraphQL repository data into
//! the local [`RepoPage`](repodo_protocol::RepoPage) shape. It provides two
//! read operations, both cursor-paginated:
//!
//! - [`GitHubClient::viewer_repositories`]: the authenticated user's
//!   repositories, most recently updated first
//! - [`GitHubClient::search_repositories`]: repository search by query
//!   string
//!
//! # Authentication
//!
//! Both operations require a token; callers without one must prompt for
//! re-authentication before getting here. Tokens are handled as
//! [`secrecy::SecretString`] so they never end up in logs.
//!
//! # Failure modes
//!
//! - Transport or non-2xx responses surface as [`Error::Api`]
//! - A GraphQL `errors` array in an otherwise successful response surfaces
//!   as [`Error::Graphql`] carrying the first error's message
//!
//! # Examples
//!
//! ```no_run
//! use secrecy::SecretString;
//! use repodo_github::{GitHubClient, PageRequest};
//!
//! # async fn example() -> repodo_github::Result<()> {
//! let token = SecretString::from("gho_your_token".to_string());
//! let client = GitHubClient::new(token, None)?;
//!
//! let page = client
//!     .viewer_repositories(&PageRequest::first_page(10))
//!     .await?;
//! println!("{} repositories total", page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod query;

pub use client::{GitHubClient, PageRequest};
pub use error::{Error, Result};
