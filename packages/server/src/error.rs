use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::Serialize;

use crate::store::StoreError;

/// Structured error response returned by all endpoints on failure.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Machine-readable error code. One of: `VALIDATION_ERROR`, `NOT_FOUND`,
    /// `CONFLICT`, `INTERNAL_ERROR`.
    #[schema(example = "VALIDATION_ERROR")]
    pub code: &'static str,
    /// Human-readable error description.
    #[schema(example = "Degree must be 1-256 characters")]
    pub message: String,
    /// Offending request field, for validation errors tied to one field.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[schema(example = "degree")]
    pub field: Option<&'static str>,
}

/// Application-level error type.
#[derive(Debug)]
pub enum AppError {
    Validation {
        field: Option<&'static str>,
        message: String,
    },
    NotFound(String),
    Conflict(String),
    Internal(String),
}

impl AppError {
    /// A validation error not tied to a single field.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation {
            field: None,
            message: message.into(),
        }
    }

    fn status_and_body(self) -> (StatusCode, ErrorBody) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorBody {
                    code: "VALIDATION_ERROR",
                    message,
                    field,
                },
            ),
            AppError::NotFound(msg) => (
                StatusCode::NOT_FOUND,
                ErrorBody {
                    code: "NOT_FOUND",
                    message: msg,
                    field: None,
                },
            ),
            AppError::Conflict(msg) => (
                StatusCode::CONFLICT,
                ErrorBody {
                    code: "CONFLICT",
                    message: msg,
                    field: None,
                },
            ),
            AppError::Internal(detail) => {
                tracing::error!("Internal error: {}", detail);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody {
                        code: "INTERNAL_ERROR",
                        message: "An unexpected error occurred".into(),
                        field: None,
                    },
                )
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = self.status_and_body();
        (status, Json(body)).into_response()
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Validation { field, message } => AppError::Validation {
                field: Some(field),
                message,
            },
            StoreError::NotFound { .. } => AppError::NotFound(err.to_string()),
            StoreError::Conflict(msg) => {
                tracing::warn!("Conflict: {msg}");
                AppError::Conflict(msg)
            }
            StoreError::Database(e) => e.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_codes() {
        let (status, body) =
            AppError::from(StoreError::validation("degree", "Degree must be 1-256 characters"))
                .status_and_body();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "VALIDATION_ERROR");
        assert_eq!(body.field, Some("degree"));

        let (status, body) =
            AppError::from(StoreError::not_found("education", 7)).status_and_body();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.message, "education '7' not found");

        let (status, _) =
            AppError::from(StoreError::Conflict("taken".into())).status_and_body();
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[test]
    fn internal_errors_do_not_leak_details() {
        let (status, body) =
            AppError::from(DbErr::Custom("password=hunter2".into())).status_and_body();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body.message.contains("hunter2"));
    }
}
