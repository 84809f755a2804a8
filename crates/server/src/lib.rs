//! HTTP API server for repodo.
//!
//! Exposes the JSON surface the clients are written against:
//!
//! - `/api/todos`: per-user todo CRUD plus bulk completed-delete
//! - `/api/favorites`: per-user favorite repository snapshots
//! - `/api/github/*`: authenticated proxy onto the GitHub reads in
//!   [`repodo_github`]
//! - `/api/auth`: email/password signup and login
//! - `/healthz`: liveness probe
//!
//! All failures answer `{error: "..."}` JSON with a conventional status
//! code; see [`ApiError`] for the mapping. The binary crate drives
//! [`Server::bind`] and [`Server::run`]; tests call [`router`] directly.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod password;
pub mod server;
pub mod state;

pub use error::{ApiError, Result};
pub use server::{Server, router};
pub use state::AppState;
