//! Router assembly and the server run loop.

use std::net::SocketAddr;

use axum::Router;
use axum::routing::{delete, get, post, put};
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::error::Result;
use crate::handlers;
use crate::state::AppState;

/// Builds the full application router.
///
/// Exposed separately from [`Server`] so tests can drive the router
/// directly without binding a socket.
#[must_use]
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route(
            "/api/auth",
            post(handlers::auth::authenticate).get(handlers::auth::logout),
        )
        .route(
            "/api/todos",
            get(handlers::todos::list_todos).post(handlers::todos::create_todo),
        )
        // Static segment wins over `:id`, so bulk-delete keeps its own path.
        .route(
            "/api/todos/completed",
            delete(handlers::todos::clear_completed),
        )
        .route(
            "/api/todos/:id",
            put(handlers::todos::update_todo).delete(handlers::todos::delete_todo),
        )
        .route(
            "/api/favorites",
            get(handlers::favorites::list_favorites)
                .post(handlers::favorites::add_favorite)
                .delete(handlers::favorites::remove_favorite),
        )
        .route(
            "/api/github/repositories",
            get(handlers::github::list_repositories),
        )
        .route(
            "/api/github/search",
            get(handlers::github::search_repositories),
        )
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}

/// A bound HTTP server ready to run.
pub struct Server {
    listener: tokio::net::TcpListener,
    app: Router,
}

impl Server {
    /// Binds the listener and assembles the router.
    ///
    /// Binding port 0 picks an ephemeral port; tests rely on this.
    ///
    /// # Errors
    ///
    /// Returns an error if the address cannot be bound.
    pub async fn bind(addr: SocketAddr, state: AppState) -> Result<Self> {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        Ok(Self {
            listener,
            app: router(state),
        })
    }

    /// The address the server is actually listening on.
    ///
    /// # Errors
    ///
    /// Returns an error if the local address cannot be read back.
    pub fn local_addr(&self) -> Result<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    /// Serves requests until the process is stopped.
    ///
    /// # Errors
    ///
    /// Returns an error if the accept loop fails.
    pub async fn run(self) -> Result<()> {
        if let Ok(addr) = self.listener.local_addr() {
            info!(%addr, "listening");
        }
        axum::serve(self.listener, self.app).await?;
        Ok(())
    }
}
