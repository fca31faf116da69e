//! Handler for the URL listing endpoint.

use axum::{Json, extract::State};

use crate::api::dto::urls::{UrlInfo, UrlListResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every stored URL, newest first.
///
/// # Endpoint
///
/// `GET /api/urls`
pub async fn url_list_handler(
    State(state): State<AppState>,
) -> Result<Json<UrlListResponse>, AppError> {
    let records = state.url_service.list_all().await?;

    let items: Vec<UrlInfo> = records
        .into_iter()
        .map(|record| {
            let short_url = state.url_service.short_url(&record.short_code);
            UrlInfo::new(record, short_url)
        })
        .collect();

    Ok(Json(UrlListResponse {
        total: items.len(),
        items,
    }))
}
