use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use roster_core::roster::{roster_error_to_status_code, RosterError};

/// Caller-facing error: a status code plus a fixed message.
///
/// This is the only place engine failures become visible to callers. The
/// original low-level diagnostic is logged here; the response body carries
/// the fixed high-level message and never the store error text.
pub struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    /// Translates an engine failure, logging the underlying diagnostic.
    ///
    /// Validation failures keep their own message (the caller needs to know
    /// what was wrong with the request); everything else collapses to the
    /// fixed per-operation message.
    pub fn from_roster(error: RosterError, operation_message: &str) -> Self {
        tracing::error!(error = %error, "{operation_message}");

        let status = StatusCode::from_u16(roster_error_to_status_code(&error))
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let message = match error {
            RosterError::InvalidRequest(message) => message,
            _ => operation_message.to_string(),
        };

        Self { status, message }
    }

    /// A 400 for request payloads that fail validation.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "message": self.message }))).into_response()
    }
}
