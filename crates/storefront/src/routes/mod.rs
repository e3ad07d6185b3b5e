//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page (hero, featured artworks, services)
//! GET  /health                 - Health check
//!
//! # Gallery
//! GET  /gallery                - Artwork grid (query: category, sort)
//! GET  /gallery/{id}           - Artwork detail with previous/next links
//!
//! # Pages
//! GET  /commissions            - Commission showcase
//! GET  /about                  - Artist bio and shipping
//!
//! # Assets
//! GET  /static/*               - Static files
//! ```

pub mod about;
pub mod commissions;
pub mod gallery;
pub mod home;

use std::path::Path;

use axum::{Router, routing::get};
use tower_http::services::ServeDir;

use crate::state::AppState;

/// Create the gallery routes router.
pub fn gallery_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(gallery::index))
        .route("/{id}", get(gallery::show))
}

/// Create all page routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/commissions", get(commissions::index))
        .route("/about", get(about::about))
        .nest("/gallery", gallery_routes())
}

/// Build the full application router, static files included.
pub fn app(state: AppState, static_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir.as_ref()))
        .with_state(state)
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check the backend.
async fn health() -> &'static str {
    "ok"
}
