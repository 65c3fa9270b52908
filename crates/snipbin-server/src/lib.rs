//! snipbin-server
//!
//! The snippet service and its HTTP surface.

use std::path::Path;

use axum::Router;
use axum::handler::HandlerWithoutStateExt;
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post, put};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod service;
pub mod state;

use state::AppState;

/// API routes only, with state applied.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/api/snippets", get(routes::snippets::list_snippets))
        .route("/api/snippets", post(routes::snippets::create_snippet))
        .route("/api/snippets/{id}", get(routes::snippets::get_snippet))
        .route("/api/snippets/{id}", put(routes::snippets::update_snippet))
        .route("/api/snippets/{id}", delete(routes::snippets::delete_snippet))
        .with_state(state)
}

/// The full application: API routes, optional static assets, a JSON 404
/// fallback, request logging and CORS.
pub fn app(state: AppState, static_dir: Option<&Path>) -> Router {
    let api = router(state);

    let app = match static_dir {
        Some(dir) => api.fallback_service(
            ServeDir::new(dir).not_found_service(routes::not_found.into_service()),
        ),
        None => api.fallback(routes::not_found),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    app.layer(axum_mw::from_fn(middleware::request_log::request_log))
        .layer(cors)
}
