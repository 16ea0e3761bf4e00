use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use booking_core::{BookingError, ValidationErrors};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    ValidationError(ValidationErrors),
    NotFoundError(String),
    ConflictError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::ValidationError(errors) => {
                tracing::debug!("Rejected request: {}", errors);
                let status = StatusCode::BAD_REQUEST;
                (status, json!({
                    "statusCode": status.as_u16(),
                    "error": "Validation failed",
                    "violations": errors.violations(),
                }))
            }
            AppError::NotFoundError(msg) => {
                let status = StatusCode::NOT_FOUND;
                (status, json!({ "statusCode": status.as_u16(), "error": msg }))
            }
            AppError::ConflictError(msg) => {
                let status = StatusCode::CONFLICT;
                (status, json!({ "statusCode": status.as_u16(), "error": msg }))
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<BookingError> for AppError {
    fn from(err: BookingError) -> Self {
        match err {
            BookingError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            BookingError::Conflict { .. } => AppError::ConflictError(err.to_string()),
        }
    }
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::ValidationError(errors)
    }
}

/// Unparseable or non-JSON bodies are reported like any other invalid input.
impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::ValidationError(ValidationErrors::single("body", rejection.body_text()))
    }
}
