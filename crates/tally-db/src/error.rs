//! Database errors

use thiserror::Error;

/// Result alias for database operations
pub type DbResult<T> = Result<T, DbError>;

/// Database errors
#[derive(Error, Debug)]
pub enum DbError {
    /// A unique constraint rejected the write
    #[error("duplicate record")]
    Duplicate,

    /// Record not found
    #[error("record not found")]
    NotFound,

    /// Any other SQLx error
    #[error("database error: {0}")]
    Sqlx(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(e: sqlx::Error) -> Self {
        match &e {
            sqlx::Error::Database(db) if db.is_unique_violation() => DbError::Duplicate,
            sqlx::Error::RowNotFound => DbError::NotFound,
            _ => DbError::Sqlx(e),
        }
    }
}
