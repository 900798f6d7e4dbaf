//! Ledger errors

use thiserror::Error;

/// Ledger errors
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Category not found
    ///
    /// Covers absent rows, rows owned by another user, and ownerless
    /// defaults alike; callers cannot tell which case they hit.
    #[error("category not found")]
    CategoryNotFound,

    /// Expense not found
    ///
    /// Same guarantee as [`LedgerError::CategoryNotFound`].
    #[error("expense not found")]
    ExpenseNotFound,

    /// A (name, owner) uniqueness conflict
    #[error("category with this name already exists")]
    Duplicate,

    /// Input failed validation
    #[error("{0}")]
    Validation(String),

    /// Database error
    #[error("database error: {0}")]
    Database(String),
}

impl LedgerError {
    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::CategoryNotFound | Self::ExpenseNotFound)
    }

    /// Get HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            Self::CategoryNotFound | Self::ExpenseNotFound => 404,
            Self::Duplicate => 400,
            Self::Validation(_) => 422,
            Self::Database(_) => 500,
        }
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::CategoryNotFound | Self::ExpenseNotFound => "NOT_FOUND",
            Self::Duplicate => "DUPLICATE",
            Self::Validation(_) => "VALIDATION",
            Self::Database(_) => "INTERNAL_ERROR",
        }
    }
}

impl From<tally_db::DbError> for LedgerError {
    fn from(err: tally_db::DbError) -> Self {
        match err {
            // The store's unique index rejected a write that slipped past
            // the pre-check.
            tally_db::DbError::Duplicate => Self::Duplicate,
            other => {
                tracing::error!("Database error: {}", other);
                Self::Database(other.to_string())
            }
        }
    }
}
