//! URL list page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;

use crate::error::AppError;
use crate::state::AppState;

pub struct ListRow {
    pub short_code: String,
    pub short_url: String,
    pub original_url: String,
    pub clicks: i64,
    pub created: String,
}

/// Renders `templates/list.html`.
#[derive(Template, WebTemplate)]
#[template(path = "list.html")]
pub struct ListTemplate {
    pub rows: Vec<ListRow>,
}

/// Renders every stored URL as an HTML table, newest first.
///
/// # Endpoint
///
/// `GET /list`
pub async fn list_handler(State(state): State<AppState>) -> Result<ListTemplate, AppError> {
    let records = state.url_service.list_all().await?;

    let rows = records
        .into_iter()
        .map(|record| ListRow {
            short_url: state.url_service.short_url(&record.short_code),
            created: record.created_at.format("%Y-%m-%d %H:%M").to_string(),
            short_code: record.short_code,
            original_url: record.original_url,
            clicks: record.clicks,
        })
        .collect();

    Ok(ListTemplate { rows })
}
