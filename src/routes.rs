//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `GET  /`            - Index page with the shorten form
//! - `GET  /list`        - HTML list of every short URL
//! - `POST /shorten`     - Shorten a single URL (rate limited)
//! - `GET  /health`      - Storage health check
//! - `/api/*`            - JSON API (rate limited)
//! - `GET  /{code}`      - Short URL redirect
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket on the creation and API routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{rate_limit, tracing};
use crate::config::RateLimitConfig;
use crate::state::AppState;
use crate::web;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `rate_limit` - token bucket settings for the rate limited routes
///
/// Fixed routes take precedence over `/{code}`; the code generator never
/// hands out a code equal to one of them.
pub fn app_router(state: AppState, rate_limit: &RateLimitConfig) -> NormalizePath<Router> {
    let api_router = api::routes::api_routes().layer(rate_limit::layer(rate_limit));

    let shorten_router = api::routes::shorten_routes().layer(rate_limit::layer(rate_limit));

    let router = Router::new()
        .merge(web::routes::page_routes())
        .merge(shorten_router)
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .nest("/api", api_router)
        .with_state(state)
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
