//! Repository traits
//!
//! Define async repository interfaces for database operations.
//!
//! Methods named `*_owned` take the acting owner alongside the row id and
//! bake both into one predicate. They yield `None` (or zero rows affected)
//! for rows that are absent, owned by another user, or ownerless defaults;
//! the three cases are deliberately indistinguishable here.

use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::*;

/// User repository trait
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DbResult<Option<UserRow>>;

    /// Find a user by email
    async fn find_by_email(&self, email: &str) -> DbResult<Option<UserRow>>;

    /// Create a new user
    async fn create(&self, user: CreateUser) -> DbResult<UserRow>;

    /// Apply profile changes; fields left `None` keep their stored value
    async fn update_profile(&self, id: Uuid, patch: UserPatch) -> DbResult<Option<UserRow>>;
}

/// Create user input
#[derive(Debug, Clone)]
pub struct CreateUser {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Profile update input
#[derive(Debug, Clone, Default)]
pub struct UserPatch {
    pub email: Option<String>,
    pub password_hash: Option<String>,
}

/// Category repository trait
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List categories visible to the owner: their own plus the defaults,
    /// ordered by name
    async fn list_visible(&self, owner: Uuid) -> DbResult<Vec<CategoryRow>>;

    /// Find the owner's category with this exact name, if any
    ///
    /// Scoped to rows the owner holds; defaults and other users' rows are
    /// never returned.
    async fn find_by_name(&self, owner: Uuid, name: &str) -> DbResult<Option<CategoryRow>>;

    /// Create a category owned by `owner`
    async fn create(&self, owner: Uuid, name: &str) -> DbResult<CategoryRow>;

    /// Fetch one of the owner's categories by id
    async fn get_owned(&self, owner: Uuid, id: i64) -> DbResult<Option<CategoryRow>>;

    /// Rename one of the owner's categories
    async fn update_owned(&self, owner: Uuid, id: i64, name: &str)
    -> DbResult<Option<CategoryRow>>;

    /// Delete one of the owner's categories, returning rows affected
    async fn delete_owned(&self, owner: Uuid, id: i64) -> DbResult<u64>;
}

/// Expense repository trait
#[async_trait]
pub trait ExpenseRepository: Send + Sync {
    /// List the owner's expenses, newest date first (ties broken by id,
    /// newest first), narrowed by the optional filter fields
    async fn list_visible(&self, owner: Uuid, filter: ExpenseFilter) -> DbResult<Vec<ExpenseRow>>;

    /// Create an expense owned by `owner`
    async fn create(&self, owner: Uuid, expense: CreateExpense) -> DbResult<ExpenseRow>;

    /// Fetch one of the owner's expenses by id
    async fn get_owned(&self, owner: Uuid, id: i64) -> DbResult<Option<ExpenseRow>>;

    /// Apply a partial update to one of the owner's expenses
    async fn update_owned(
        &self,
        owner: Uuid,
        id: i64,
        patch: ExpensePatch,
    ) -> DbResult<Option<ExpenseRow>>;

    /// Delete one of the owner's expenses, returning rows affected
    async fn delete_owned(&self, owner: Uuid, id: i64) -> DbResult<u64>;

    /// Sum the owner's expenses grouped by category label
    async fn category_totals(&self, owner: Uuid) -> DbResult<Vec<CategoryTotalRow>>;
}

/// Create expense input
///
/// The owner is never part of the input; it is passed separately and
/// stamped by the repository.
#[derive(Debug, Clone)]
pub struct CreateExpense {
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Partial expense update
///
/// Fields left `None` keep their stored value. `description` cannot be
/// cleared back to NULL through a patch; absent means unchanged.
#[derive(Debug, Clone, Default)]
pub struct ExpensePatch {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Expense listing filter
///
/// All fields are optional and combine with AND; date bounds are
/// inclusive. The owner predicate is always applied on top.
#[derive(Debug, Clone, Default)]
pub struct ExpenseFilter {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
