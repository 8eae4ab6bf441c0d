//! # synapse-http — the proxy's own HTTP surface
//!
//! What remote runtimes and operators talk to:
//!
//! | Route | Purpose |
//! |-------|---------|
//! | `POST /environments` | runtime self-registration (upsert) |
//! | `GET /environments` | all runtime records, probed live |
//! | `GET /environments/:engine` | one record, probed live |
//! | `GET /artifacts/*path` | artifact bytes for runtimes to pull |
//! | `GET /health` | process liveness |
//!
//! Handlers hold no state of their own: everything lives in
//! [`AppState`], built by the host process and shared via `Arc`.

#![deny(missing_docs)]

mod error;
mod routes;
mod state;

use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};
use tower_http::trace::TraceLayer;

pub use error::ApiError;
pub use routes::RegisterRequest;
pub use state::AppState;

/// Build the full router over `state`.
///
/// Used by the server binary and by integration tests, so both serve
/// exactly the same surface.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .route(
            "/environments",
            post(routes::register_runtime).get(routes::list_runtimes),
        )
        .route("/environments/:engine", get(routes::get_runtime))
        .route("/artifacts/*path", get(routes::get_artifact))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve the router on `listener` until the process exits.
pub async fn serve(
    listener: tokio::net::TcpListener,
    state: Arc<AppState>,
) -> std::io::Result<()> {
    axum::serve(listener, build_router(state)).await
}
