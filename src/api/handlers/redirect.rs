//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Click Tracking
///
/// The click counter is incremented before the redirect is sent. A failed
/// increment is logged and never turns into an error response.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist. Unknown codes
/// never create records.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    match state.url_service.resolve(&code).await? {
        Some(original_url) => Ok(Redirect::temporary(&original_url)),
        None => Err(AppError::not_found(
            "Short URL not found",
            json!({ "code": code }),
        )),
    }
}
