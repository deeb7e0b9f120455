use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::schema::FieldError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    /// One or more fields of the active step failed their constraints.
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(Vec<FieldError>),

    /// A uniqueness-constrained list editor was committed with repeated values.
    #[error("The fields have non-unique values")]
    DuplicateValue(Vec<String>),

    #[error("Step out of range: {0}")]
    StepOutOfRange(String),

    /// A layout element was addressed as a kind other than the one it holds.
    #[error("Kind mismatch: {0}")]
    KindMismatch(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message, details) = match &self {
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone(), None),
            AppError::FieldValidation(errors) => (
                StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                self.to_string(),
                Some(json!(errors)),
            ),
            AppError::DuplicateValue(values) => (
                StatusCode::CONFLICT,
                "DUPLICATE_VALUE",
                self.to_string(),
                Some(json!({ "duplicates": values })),
            ),
            AppError::StepOutOfRange(msg) => {
                (StatusCode::CONFLICT, "STEP_OUT_OF_RANGE", msg.clone(), None)
            }
            AppError::KindMismatch(msg) => {
                (StatusCode::CONFLICT, "KIND_MISMATCH", msg.clone(), None)
            }
            AppError::Database(e) => {
                tracing::error!("Database error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                    None,
                )
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                    None,
                )
            }
        };

        let mut error = json!({
            "code": code,
            "message": message
        });
        if let Some(details) = details {
            error["details"] = details;
        }

        (status, Json(json!({ "error": error }))).into_response()
    }
}
