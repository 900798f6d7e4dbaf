//! Ledger service - ownership-scoped bookkeeping operations

use std::collections::BTreeMap;
use std::sync::Arc;

use tally_db::{
    CategoryRepository, CategoryRow, CreateExpense, ExpenseFilter, ExpensePatch,
    ExpenseRepository, ExpenseRow,
};
use tally_types::{CategoryId, ExpenseId, SpendingSummary, UserId};

use crate::LedgerError;

const NAME_MAX: usize = 100;
const CURRENCY_MAX: usize = 10;
const DESCRIPTION_MAX: usize = 500;

/// Ledger service
///
/// Orchestrates category and expense operations for one acting user at a
/// time. The acting user is an explicit argument on every operation and is
/// the only scope rows are read or written under.
pub struct LedgerService<C: CategoryRepository, E: ExpenseRepository> {
    categories: Arc<C>,
    expenses: Arc<E>,
}

impl<C: CategoryRepository, E: ExpenseRepository> LedgerService<C, E> {
    /// Create a new ledger service
    pub fn new(categories: Arc<C>, expenses: Arc<E>) -> Self {
        Self {
            categories,
            expenses,
        }
    }

    // =========================================================================
    // Categories
    // =========================================================================

    /// List the acting user's categories plus the shared defaults
    pub async fn list_categories(&self, acting: UserId) -> Result<Vec<CategoryRow>, LedgerError> {
        Ok(self.categories.list_visible(acting.0).await?)
    }

    /// Create a category owned by the acting user
    pub async fn create_category(
        &self,
        acting: UserId,
        name: &str,
    ) -> Result<CategoryRow, LedgerError> {
        validate_name("name", name)?;

        // Fast-path duplicate check; the store's unique index stays
        // authoritative when two creates race.
        if self
            .categories
            .find_by_name(acting.0, name)
            .await?
            .is_some()
        {
            return Err(LedgerError::Duplicate);
        }

        let row = self.categories.create(acting.0, name).await?;
        tracing::info!(user_id = %acting, category_id = row.id, "Created category");
        Ok(row)
    }

    /// Rename one of the acting user's categories
    ///
    /// Defaults and other users' categories are not renameable and report
    /// as not found.
    pub async fn update_category(
        &self,
        acting: UserId,
        id: CategoryId,
        name: &str,
    ) -> Result<CategoryRow, LedgerError> {
        validate_name("name", name)?;

        if let Some(existing) = self.categories.find_by_name(acting.0, name).await? {
            if existing.id != id.0 {
                return Err(LedgerError::Duplicate);
            }
        }

        self.categories
            .update_owned(acting.0, id.0, name)
            .await?
            .ok_or(LedgerError::CategoryNotFound)
    }

    /// Delete one of the acting user's categories
    pub async fn delete_category(&self, acting: UserId, id: CategoryId) -> Result<(), LedgerError> {
        let deleted = self.categories.delete_owned(acting.0, id.0).await?;
        if deleted == 0 {
            return Err(LedgerError::CategoryNotFound);
        }

        tracing::info!(user_id = %acting, category_id = id.0, "Deleted category");
        Ok(())
    }

    // =========================================================================
    // Expenses
    // =========================================================================

    /// List the acting user's expenses, newest first
    pub async fn list_expenses(
        &self,
        acting: UserId,
        filter: ExpenseFilter,
    ) -> Result<Vec<ExpenseRow>, LedgerError> {
        Ok(self.expenses.list_visible(acting.0, filter).await?)
    }

    /// Record an expense for the acting user
    pub async fn create_expense(
        &self,
        acting: UserId,
        expense: CreateExpense,
    ) -> Result<ExpenseRow, LedgerError> {
        validate_amount(expense.amount)?;
        validate_name("category", &expense.category)?;
        validate_currency(&expense.currency)?;
        validate_description(expense.description.as_deref())?;

        let row = self.expenses.create(acting.0, expense).await?;
        tracing::info!(user_id = %acting, expense_id = row.id, "Created expense");
        Ok(row)
    }

    /// Fetch one of the acting user's expenses
    pub async fn get_expense(
        &self,
        acting: UserId,
        id: ExpenseId,
    ) -> Result<ExpenseRow, LedgerError> {
        self.expenses
            .get_owned(acting.0, id.0)
            .await?
            .ok_or(LedgerError::ExpenseNotFound)
    }

    /// Apply a partial update to one of the acting user's expenses
    pub async fn update_expense(
        &self,
        acting: UserId,
        id: ExpenseId,
        patch: ExpensePatch,
    ) -> Result<ExpenseRow, LedgerError> {
        if let Some(amount) = patch.amount {
            validate_amount(amount)?;
        }
        if let Some(ref label) = patch.category {
            validate_name("category", label)?;
        }
        if let Some(ref currency) = patch.currency {
            validate_currency(currency)?;
        }
        validate_description(patch.description.as_deref())?;

        self.expenses
            .update_owned(acting.0, id.0, patch)
            .await?
            .ok_or(LedgerError::ExpenseNotFound)
    }

    /// Delete one of the acting user's expenses
    pub async fn delete_expense(&self, acting: UserId, id: ExpenseId) -> Result<(), LedgerError> {
        let deleted = self.expenses.delete_owned(acting.0, id.0).await?;
        if deleted == 0 {
            return Err(LedgerError::ExpenseNotFound);
        }

        tracing::info!(user_id = %acting, expense_id = id.0, "Deleted expense");
        Ok(())
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Aggregate the acting user's spending
    ///
    /// One grouped query produces the per-category sums; the grand total is
    /// the sum of those groups, so the two figures cannot drift apart. A
    /// user with no expenses gets a zero total and an empty map.
    pub async fn summarize(&self, acting: UserId) -> Result<SpendingSummary, LedgerError> {
        let rows = self.expenses.category_totals(acting.0).await?;

        let mut by_category = BTreeMap::new();
        let mut total = 0.0;
        for row in rows {
            total += row.total;
            by_category.insert(row.category, row.total);
        }

        Ok(SpendingSummary { total, by_category })
    }
}

impl<C: CategoryRepository, E: ExpenseRepository> std::fmt::Debug for LedgerService<C, E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LedgerService").finish_non_exhaustive()
    }
}

fn validate_name(field: &'static str, value: &str) -> Result<(), LedgerError> {
    let len = value.chars().count();
    if len == 0 || len > NAME_MAX {
        return Err(LedgerError::Validation(format!(
            "{field} must be 1-{NAME_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_amount(amount: f64) -> Result<(), LedgerError> {
    // NaN fails the is_finite check, not the comparison.
    if !amount.is_finite() || amount <= 0.0 {
        return Err(LedgerError::Validation(
            "amount must be greater than zero".to_string(),
        ));
    }
    Ok(())
}

fn validate_currency(currency: &str) -> Result<(), LedgerError> {
    let len = currency.chars().count();
    if len == 0 || len > CURRENCY_MAX {
        return Err(LedgerError::Validation(format!(
            "currency must be 1-{CURRENCY_MAX} characters"
        )));
    }
    Ok(())
}

fn validate_description(description: Option<&str>) -> Result<(), LedgerError> {
    if let Some(d) = description {
        if d.chars().count() > DESCRIPTION_MAX {
            return Err(LedgerError::Validation(format!(
                "description must be at most {DESCRIPTION_MAX} characters"
            )));
        }
    }
    Ok(())
}
