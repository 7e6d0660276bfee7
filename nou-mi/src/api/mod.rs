//! HTTP API handlers for nou-mi

pub mod auth;
pub mod health;
pub mod import;
pub mod template;

pub use health::health_routes;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::AppState;

/// Build member import/template routes
///
/// The import upload requires the admin session cookie; the template
/// download is public, as is /health.
pub fn membre_routes() -> Router<AppState> {
    Router::new()
        .route("/api/membres/import", post(import::import_membres))
        // The whole file is processed regardless of size; lift axum's
        // default body cap on the upload route
        .layer(DefaultBodyLimit::disable())
        .layer(middleware::from_fn(auth::require_session))
        .route("/api/membres/template", get(template::download_template))
}
