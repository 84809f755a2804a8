//! Typed client for the repodo HTTP API.
//!
//! Three layers:
//!
//! - [`ApiClient`]: stateless typed calls over every endpoint
//! - [`Session`]: the auth state machine, attaching the locally cached
//!   GitHub token to the signed-in user
//! - [`FavoritesView`]: the user's favorites with optimistic add/remove
//!   and rollback on remote failure
//!
//! # Examples
//!
//! ```no_run
//! use repodo_client::{ApiClient, Page};
//! use secrecy::SecretString;
//!
//! # async fn example() -> repodo_client::Result<()> {
//! let client = ApiClient::from_url("http://127.0.0.1:8080")?;
//! let user = client.login("ada@example.com", "hunter22").await?;
//!
//! let todo = client.create_todo(&user.uid, "Read the docs").await?;
//! println!("created {}", todo.id);
//!
//! let token = SecretString::from("gho_xxx".to_string());
//! let page = client.repositories(&token, &Page::default()).await?;
//! println!("{} repositories", page.total_count);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod favorites;
pub mod session;

pub use client::{ApiClient, Page};
pub use error::{ClientError, Result};
pub use favorites::{FavoritesBackend, FavoritesView};
pub use session::{AuthState, Session, login_error_message, signup_error_message};
