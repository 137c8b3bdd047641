use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::models::{contact::ApiSendEmailError, ApiError};

pub const MISSING_REQUIRED_FIELDS: &str = "Missing required fields";
pub const METHOD_NOT_ALLOWED: &str = "Method not allowed";
pub const FAILED_TO_SEND_EMAIL: &str = "Failed to send email";

/// The 500 response shared by delivery failures and handler panics.
pub fn failed_to_send_email(details: impl Into<String>) -> Response {
    error_with(
        StatusCode::INTERNAL_SERVER_ERROR,
        ApiSendEmailError {
            error: FAILED_TO_SEND_EMAIL,
            details: details.into(),
        },
    )
}

pub fn error(code: StatusCode, error: &'static str) -> Response {
    (code, Json(ApiError { error })).into_response()
}

pub fn error_with(code: StatusCode, body: impl Serialize) -> Response {
    (code, Json(body)).into_response()
}
