//! Index page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::error::AppError;
use crate::state::AppState;

/// Renders `templates/index.html`: the shorten form plus running totals.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub total_urls: i64,
    pub total_clicks: i64,
}

/// Renders the index page.
///
/// # Endpoint
///
/// `GET /`
///
/// The form submits to `POST /shorten` from JavaScript.
pub async fn index_handler(State(state): State<AppState>) -> Result<IndexTemplate, AppError> {
    let stats = state.url_service.stats().await?;

    Ok(IndexTemplate {
        total_urls: stats.total_urls,
        total_clicks: stats.total_clicks,
    })
}
