//! Axum extractors for authentication

use axum::Json;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::request::Parts;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use tally_types::UserId;

use crate::state::AppState;

/// Authenticated user extracted from the bearer token
///
/// Resolution goes through the auth service, so a token whose subject no
/// longer exists is rejected the same way as a bad signature.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub email: String,
}

/// Error response for auth failures
#[derive(Debug, Serialize)]
struct AuthErrorResponse {
    error: AuthErrorDetail,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetail {
    code: &'static str,
    message: &'static str,
}

/// Auth rejection type
#[derive(Debug)]
pub struct AuthRejection {
    status: StatusCode,
    code: &'static str,
    message: &'static str,
}

impl AuthRejection {
    /// One fixed body for every failed token, whatever the cause
    fn invalid_token() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            code: "INVALID_TOKEN",
            message: "Invalid or expired token",
        }
    }
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        let body = AuthErrorResponse {
            error: AuthErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (self.status, Json(body)).into_response()
    }
}

impl<S> FromRequestParts<S> for AuthUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);

        let token = bearer_token(parts)?;

        let user = app_state.auth.resolve(&token).await.map_err(|e| {
            tracing::debug!(error = ?e, "Token resolution failed");
            AuthRejection::invalid_token()
        })?;

        Ok(AuthUser {
            user_id: user.user_id(),
            username: user.username,
            email: user.email,
        })
    }
}

/// Extract the bearer token from the Authorization header
///
/// The bearer token is the sole credential; there is no cookie fallback.
fn bearer_token(parts: &Parts) -> Result<String, AuthRejection> {
    let Some(auth_header) = parts.headers.get(header::AUTHORIZATION) else {
        return Err(AuthRejection {
            status: StatusCode::UNAUTHORIZED,
            code: "MISSING_TOKEN",
            message: "No authentication token provided",
        });
    };

    let auth_str = auth_header.to_str().map_err(|_| AuthRejection {
        status: StatusCode::BAD_REQUEST,
        code: "INVALID_HEADER",
        message: "Invalid Authorization header encoding",
    })?;

    match auth_str.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() => Ok(token.to_string()),
        _ => Err(AuthRejection::invalid_token()),
    }
}
