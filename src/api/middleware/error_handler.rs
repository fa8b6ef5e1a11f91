//! Conversion of `AppError` into HTTP responses.
//!
//! Provides the consistent error response format across the API, with
//! status code mapping and message sanitization for internal failures.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl IntoResponse for AppError {
    /// Status code mapping:
    /// - NotFound → 404
    /// - Duplicate → 409
    /// - Validation / ValidationErrors / BadRequest → 400
    /// - Database / Configuration / Internal → 500
    fn into_response(self) -> Response {
        let (status, error_response) = match &self {
            AppError::NotFound { .. } => (
                StatusCode::NOT_FOUND,
                ErrorResponse::new("NOT_FOUND", &self.to_string()),
            ),
            AppError::Duplicate { entity, field, value } => (
                StatusCode::CONFLICT,
                ErrorResponse::new("DUPLICATE", &self.to_string()).with_details(json!({
                    "entity": entity,
                    "field": field,
                    "value": value,
                })),
            ),
            AppError::Validation { field, reason } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("VALIDATION_ERROR", &self.to_string()).with_details(json!({
                    "field": field,
                    "reason": reason,
                })),
            ),
            AppError::ValidationErrors { errors } => {
                let fields: Vec<_> = errors
                    .iter()
                    .map(|error| {
                        json!({
                            "field": error.field,
                            "message": error.message,
                        })
                    })
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    ErrorResponse::new("VALIDATION_ERROR", "Request validation failed")
                        .with_details(json!(fields)),
                )
            }
            AppError::BadRequest { message } => (
                StatusCode::BAD_REQUEST,
                ErrorResponse::new("BAD_REQUEST", message),
            ),
            AppError::Database { operation, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new(
                    "DATABASE_ERROR",
                    &format!("Database operation failed: {}", operation),
                ),
            ),
            AppError::Configuration { key, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {}", key)),
            ),
            AppError::Internal { .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred"),
            ),
        };

        if status.is_server_error() {
            tracing::error!(error = ?self, "Request failed");
        }

        (status, Json(error_response)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationFieldError;

    fn status_of(error: AppError) -> StatusCode {
        error.into_response().status()
    }

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            status_of(AppError::NotFound {
                entity: "user".into(),
                field: "username".into(),
                value: "alice".into(),
            }),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Duplicate {
                entity: "users".into(),
                field: "username".into(),
                value: "alice".into(),
            }),
            StatusCode::CONFLICT
        );
        assert_eq!(
            status_of(AppError::ValidationErrors {
                errors: vec![ValidationFieldError {
                    field: "title".into(),
                    message: "must not be empty".into(),
                }],
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::BadRequest {
                message: "nope".into(),
            }),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            status_of(AppError::Internal {
                source: anyhow::anyhow!("boom"),
            }),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
