//! Web page route configuration.

use crate::state::AppState;
use crate::web::handlers::{index_handler, list_handler};
use axum::{Router, routing::get};

/// HTML pages.
///
/// # Endpoints
///
/// - `GET /`     - Shorten form with running totals
/// - `GET /list` - Table of every stored URL
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(index_handler))
        .route("/list", get(list_handler))
}
