//! Database row models
//!
//! These types map directly to database rows using SQLx's FromRow derive.

use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

/// User row from the database
#[derive(Debug, Clone, FromRow)]
pub struct UserRow {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Category row from the database
///
/// `user_id` is NULL for default categories, which are visible to every
/// user and mutable by none.
#[derive(Debug, Clone, FromRow)]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub user_id: Option<Uuid>,
}

/// Expense row from the database
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub id: i64,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
    pub user_id: Uuid,
}

/// One group from the per-category spending aggregate
#[derive(Debug, Clone, FromRow)]
pub struct CategoryTotalRow {
    pub category: String,
    pub total: f64,
}

// Conversion implementations from Row types to tally-types domain types
impl UserRow {
    /// Convert to domain UserId
    pub fn user_id(&self) -> tally_types::UserId {
        tally_types::UserId(self.id)
    }
}

impl CategoryRow {
    /// Convert to domain CategoryId
    pub fn category_id(&self) -> tally_types::CategoryId {
        tally_types::CategoryId(self.id)
    }

    /// Whether this is a shared default category (no owner)
    pub fn is_default(&self) -> bool {
        self.user_id.is_none()
    }
}

impl ExpenseRow {
    /// Convert to domain ExpenseId
    pub fn expense_id(&self) -> tally_types::ExpenseId {
        tally_types::ExpenseId(self.id)
    }

    /// Convert to domain UserId
    pub fn owner_id(&self) -> tally_types::UserId {
        tally_types::UserId(self.user_id)
    }
}
