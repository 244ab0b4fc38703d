//! Vendora Web library.
//!
//! This crate provides the marketplace front end as a library, allowing it
//! to be tested and reused. The binary in `main.rs` loads configuration,
//! wires the backend client, and serves the router built by [`app`].

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod error;
pub mod filters;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use axum::routing::get;
use tower_http::services::ServeDir;

use state::AppState;

/// Build the full application router: routes, static assets, sessions, and
/// the route guard, in that order from the inside out.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    Router::new()
        .route("/health", get(health))
        .merge(routes::routes())
        .nest_service("/static", ServeDir::new("crates/web/static"))
        .layer(session_layer)
        // The route guard runs at the edge, before sessions or handlers,
        // using only the `user` cookie
        .layer(axum::middleware::from_fn(middleware::route_guard))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}
