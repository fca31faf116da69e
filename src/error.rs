//! HTTP-facing error type.
//!
//! Every JSON error leaves the service as
//! `{"error": {"code": ..., "message": ..., "details": ...}}`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use serde_json::{Value, json};
use tracing::error;

use crate::domain::errors::{ShortenError, StorageError};
use crate::utils::url_normalizer::UrlValidationError;

#[derive(Serialize)]
struct ErrorBody {
    error: ErrorInfo,
}

/// Machine-readable error payload, also embedded in batch results.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub code: &'static str,
    pub message: String,
    pub details: Value,
}

#[derive(Debug)]
pub enum AppError {
    Validation {
        code: &'static str,
        message: String,
        details: Value,
    },
    NotFound {
        message: String,
        details: Value,
    },
    ServiceUnavailable {
        message: String,
        details: Value,
    },
    Internal {
        code: &'static str,
        message: String,
        details: Value,
    },
}

impl AppError {
    pub fn bad_request(message: impl Into<String>, details: Value) -> Self {
        Self::Validation {
            code: "validation_error",
            message: message.into(),
            details,
        }
    }

    pub fn not_found(message: impl Into<String>, details: Value) -> Self {
        Self::NotFound {
            message: message.into(),
            details,
        }
    }

    pub fn unavailable(message: impl Into<String>, details: Value) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            details,
        }
    }

    pub fn internal(message: impl Into<String>, details: Value) -> Self {
        Self::Internal {
            code: "internal_error",
            message: message.into(),
            details,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::ServiceUnavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { code, .. } | AppError::Internal { code, .. } => *code,
            AppError::NotFound { .. } => "not_found",
            AppError::ServiceUnavailable { .. } => "storage_unavailable",
        }
    }

    /// Converts into the payload used both for responses and batch items.
    pub fn to_error_info(&self) -> ErrorInfo {
        let (message, details) = match self {
            AppError::Validation {
                message, details, ..
            }
            | AppError::NotFound { message, details }
            | AppError::ServiceUnavailable { message, details }
            | AppError::Internal {
                message, details, ..
            } => (message.clone(), details.clone()),
        };

        ErrorInfo {
            code: self.code(),
            message,
            details,
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let info = self.to_error_info();
        write!(f, "{}: {}", info.code, info.message)
    }
}

impl std::error::Error for AppError {}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            error!(code = self.code(), "Request failed: {}", self);
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        let details = serde_json::to_value(&e).unwrap_or(Value::Null);
        AppError::bad_request("Validation failed", details)
    }
}

impl From<UrlValidationError> for AppError {
    fn from(e: UrlValidationError) -> Self {
        let (code, details) = match &e {
            UrlValidationError::EmptyInput => ("empty_input", json!({})),
            UrlValidationError::TooLong { length } => (
                "too_long",
                json!({ "length": length, "max": crate::utils::url_normalizer::MAX_URL_LENGTH }),
            ),
            UrlValidationError::InvalidFormat { url } => ("invalid_format", json!({ "url": url })),
        };

        AppError::Validation {
            code,
            message: e.to_string(),
            details,
        }
    }
}

impl From<StorageError> for AppError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::Unavailable(reason) => {
                AppError::unavailable("Storage is unavailable", json!({ "reason": reason }))
            }
            StorageError::Query(reason) | StorageError::Corrupted(reason) => AppError::Internal {
                code: "storage_error",
                message: "Storage operation failed".to_string(),
                details: json!({ "reason": reason }),
            },
        }
    }
}

impl From<ShortenError> for AppError {
    fn from(e: ShortenError) -> Self {
        match e {
            ShortenError::Validation(e) => e.into(),
            ShortenError::Storage(e) => e.into(),
            ShortenError::AllocationExhausted { attempts } => AppError::Internal {
                code: "allocation_exhausted",
                message: "Could not allocate a free short code".to_string(),
                details: json!({ "attempts": attempts }),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_validation_codes() {
        let empty: AppError = UrlValidationError::EmptyInput.into();
        let long: AppError = UrlValidationError::TooLong { length: 3000 }.into();
        let invalid: AppError = UrlValidationError::InvalidFormat {
            url: "https://x".to_string(),
        }
        .into();

        assert_eq!(empty.code(), "empty_input");
        assert_eq!(long.code(), "too_long");
        assert_eq!(invalid.code(), "invalid_format");
        assert_eq!(empty.status(), StatusCode::BAD_REQUEST);
        assert_eq!(long.to_error_info().details["length"], 3000);
    }

    #[test]
    fn test_storage_unavailable_is_503() {
        let err: AppError = StorageError::Unavailable("refused".to_string()).into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "storage_unavailable");
    }

    #[test]
    fn test_storage_query_is_500() {
        let err: AppError = StorageError::Query("syntax".to_string()).into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "storage_error");
    }

    #[test]
    fn test_allocation_exhausted_mapping() {
        let err: AppError = ShortenError::AllocationExhausted { attempts: 10 }.into();
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "allocation_exhausted");
        assert_eq!(err.to_error_info().details["attempts"], 10);
    }

    #[test]
    fn test_shorten_error_validation_passthrough() {
        let err: AppError = ShortenError::Validation(UrlValidationError::EmptyInput).into();
        assert_eq!(err.code(), "empty_input");
    }

    #[test]
    fn test_not_found_response_status() {
        let response = AppError::not_found("Short code not found", json!({})).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
