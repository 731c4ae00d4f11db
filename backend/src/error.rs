//! Error handling for the stock tracking service
//!
//! Every error is rendered as `{ "error": { "code", "message", "field" } }`

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use shared::LabelError;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation { field: String, message: String },

    #[error("Packet label error: {0}")]
    LabelFormat(#[from] LabelError),

    // External service errors
    #[error("Sheets API error: {0}")]
    SheetsApi(String),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl AppError {
    /// Validation failure on a named input field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        AppError::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

/// Error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

impl AppError {
    fn status_and_detail(&self) -> (StatusCode, ErrorDetail) {
        match self {
            AppError::Validation { field, message } => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "VALIDATION_ERROR".to_string(),
                    message: message.clone(),
                    field: Some(field.clone()),
                },
            ),
            AppError::LabelFormat(err) => (
                StatusCode::BAD_REQUEST,
                ErrorDetail {
                    code: "LABEL_FORMAT_ERROR".to_string(),
                    message: err.to_string(),
                    field: Some(
                        match err {
                            LabelError::Format(_) => "production_batch_id",
                            LabelError::PackingDate(_) => "packing_date",
                            LabelError::SequenceOutOfRange(_) => "sequence",
                        }
                        .to_string(),
                    ),
                },
            ),
            AppError::SheetsApi(msg) => (
                StatusCode::BAD_GATEWAY,
                ErrorDetail {
                    code: "SHEETS_API_ERROR".to_string(),
                    message: format!("Sheets API error: {}", msg),
                    field: None,
                },
            ),
            AppError::Configuration(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ErrorDetail {
                    code: "CONFIGURATION_ERROR".to_string(),
                    message: format!("Configuration error: {}", msg),
                    field: None,
                },
            ),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_detail) = self.status_and_detail();

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ErrorResponse { error: error_detail })).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_errors_are_bad_requests() {
        let err = AppError::from(LabelError::Format("WIP".to_string()));
        let (status, detail) = err.status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.code, "LABEL_FORMAT_ERROR");
        assert_eq!(detail.field.as_deref(), Some("production_batch_id"));
    }

    #[test]
    fn test_sheets_errors_are_bad_gateway() {
        let response = AppError::SheetsApi("timeout".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_validation_carries_field() {
        let (status, detail) = AppError::validation("unit_count", "Unit count must be positive")
            .status_and_detail();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(detail.field.as_deref(), Some("unit_count"));
    }
}
