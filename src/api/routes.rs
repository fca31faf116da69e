//! API route configuration.

use crate::api::handlers::{
    shorten_handler, shorten_url_handler, stats_handler, url_list_handler, url_stats_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// JSON API routes, nested under `/api`.
///
/// # Endpoints
///
/// - `POST /shorten`       - Create short URLs (batch-capable)
/// - `GET  /stats`         - Total URL and click counts
/// - `GET  /stats/{code}`  - Statistics for a single short code
/// - `GET  /urls`          - Every stored URL, newest first
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/stats", get(stats_handler))
        .route("/stats/{code}", get(url_stats_handler))
        .route("/urls", get(url_list_handler))
}

/// Single-URL creation endpoint used by the index page: `POST /shorten`.
pub fn shorten_routes() -> Router<AppState> {
    Router::new().route("/shorten", post(shorten_url_handler))
}
