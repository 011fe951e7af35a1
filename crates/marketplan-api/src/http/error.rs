//! Application error type mapping to the fixed webhook responses.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::http::response::{MessageBody, FAILURE_MESSAGE, INVALID_FORM_MESSAGE};

/// Request-level failure. Causes are logged where they happen; the variant
/// only picks the status code and the fixed message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    /// Body was not valid JSON or failed form validation.
    InvalidForm,
    /// Generation or publishing failed.
    PlanFailed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidForm => (StatusCode::BAD_REQUEST, INVALID_FORM_MESSAGE),
            AppError::PlanFailed => (StatusCode::INTERNAL_SERVER_ERROR, FAILURE_MESSAGE),
        };

        (status, Json(MessageBody::new(message))).into_response()
    }
}
