//! Auth errors

use thiserror::Error;

/// Authentication errors
#[derive(Error, Debug)]
pub enum AuthError {
    /// Invalid token (malformed, bad signature, etc.)
    #[error("invalid token")]
    InvalidToken,

    /// Token has expired
    #[error("token expired")]
    TokenExpired,

    /// Token verified but its subject no longer maps to a user
    #[error("unknown subject")]
    UnknownSubject,

    /// Invalid credentials (unknown username or wrong password)
    #[error("incorrect username or password")]
    InvalidCredentials,

    /// Username or email already registered
    #[error("username or email already registered")]
    AlreadyRegistered,

    /// Email already belongs to another user
    #[error("email already in use")]
    EmailTaken,

    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("configuration error: {0}")]
    Configuration(String),

    /// Internal error
    #[error("internal error: {0}")]
    Internal(String),
}

impl AuthError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidToken
            | Self::TokenExpired
            | Self::UnknownSubject
            | Self::InvalidCredentials => 401,
            Self::AlreadyRegistered | Self::EmailTaken => 400,
            Self::Validation(_) => 422,
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => 500,
        }
    }

    /// Get error code for API responses
    ///
    /// Every token failure shares one code; responses never reveal whether
    /// a token was malformed, expired, or orphaned by a deleted user.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidToken | Self::TokenExpired | Self::UnknownSubject => "INVALID_TOKEN",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::AlreadyRegistered => "ALREADY_REGISTERED",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::Validation(_) => "VALIDATION",
            Self::Database(_) | Self::Configuration(_) | Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<tally_db::DbError> for AuthError {
    fn from(err: tally_db::DbError) -> Self {
        match err {
            // A unique index rejected the insert after the availability
            // checks passed; same outcome as losing the pre-check.
            tally_db::DbError::Duplicate => Self::AlreadyRegistered,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Database(other.to_string())
            }
        }
    }
}
