//! Error types for the Ledger API service.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tally_auth_core::AuthError;
use tally_ledger_core::LedgerError;

/// API error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

/// API error type
///
/// Domain errors carry their own status and code; the wrapper only turns
/// them into HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error("{0}")]
    BadRequest(String),
}

impl ApiError {
    fn status_code(&self) -> StatusCode {
        let code = match self {
            Self::Auth(e) => e.status_code(),
            Self::Ledger(e) => e.status_code(),
            Self::BadRequest(_) => 400,
        };
        StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Auth(e) => e.error_code(),
            Self::Ledger(e) => e.error_code(),
            Self::BadRequest(_) => "BAD_REQUEST",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        // Log internal errors
        if status.is_server_error() {
            tracing::error!(error = ?self, "Internal API error");
        }

        // Token failures share one body regardless of cause; the variant
        // stays in the logs only.
        let message = if code == "INVALID_TOKEN" {
            "Invalid or expired token".to_string()
        } else {
            self.to_string()
        };

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;
