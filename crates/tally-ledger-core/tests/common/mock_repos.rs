//! In-memory mock repositories for exercising the ledger service without a
//! database. Uniqueness and ownership rules mirror the real schema.

use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use chrono::NaiveDate;
use dashmap::DashMap;
use tally_db::{
    CategoryRepository, CategoryRow, CategoryTotalRow, CreateExpense, DbError, DbResult,
    ExpenseFilter, ExpensePatch, ExpenseRepository, ExpenseRow,
};
use tokio::sync::Mutex;
use uuid::Uuid;

// =============================================================================
// Categories
// =============================================================================

#[derive(Clone, Default)]
pub struct MockCategoryRepository {
    rows: Arc<DashMap<i64, CategoryRow>>,
    next_id: Arc<AtomicI64>,
    // Held across check-and-insert so writes are atomic, as the unique
    // index makes them in the real store.
    write_lock: Arc<Mutex<()>>,
}

impl MockCategoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a shared default category (no owner)
    #[allow(dead_code)]
    pub fn insert_default(&self, name: &str) -> CategoryRow {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = CategoryRow {
            id,
            name: name.to_string(),
            user_id: None,
        };
        self.rows.insert(id, row.clone());
        row
    }

    fn name_taken(&self, owner: Uuid, name: &str, except: Option<i64>) -> bool {
        self.rows.iter().any(|r| {
            r.name == name && r.user_id == Some(owner) && Some(r.id) != except
        })
    }
}

#[async_trait]
impl CategoryRepository for MockCategoryRepository {
    async fn list_visible(&self, owner: Uuid) -> DbResult<Vec<CategoryRow>> {
        let mut rows: Vec<CategoryRow> = self
            .rows
            .iter()
            .filter(|r| r.user_id == Some(owner) || r.user_id.is_none())
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(rows)
    }

    async fn find_by_name(&self, owner: Uuid, name: &str) -> DbResult<Option<CategoryRow>> {
        let found = self
            .rows
            .iter()
            .find(|r| r.user_id == Some(owner) && r.name == name)
            .map(|r| r.value().clone());
        // Scan first, then yield, so two tasks racing through the service
        // pre-check can both observe the pre-insert state.
        tokio::task::yield_now().await;
        Ok(found)
    }

    async fn create(&self, owner: Uuid, name: &str) -> DbResult<CategoryRow> {
        let _guard = self.write_lock.lock().await;

        if self.name_taken(owner, name, None) {
            return Err(DbError::Duplicate);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = CategoryRow {
            id,
            name: name.to_string(),
            user_id: Some(owner),
        };
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn get_owned(&self, owner: Uuid, id: i64) -> DbResult<Option<CategoryRow>> {
        Ok(self
            .rows
            .get(&id)
            .filter(|r| r.user_id == Some(owner))
            .map(|r| r.value().clone()))
    }

    async fn update_owned(&self, owner: Uuid, id: i64, name: &str) -> DbResult<Option<CategoryRow>> {
        let _guard = self.write_lock.lock().await;

        if self.name_taken(owner, name, Some(id)) {
            return Err(DbError::Duplicate);
        }

        let Some(mut row) = self.rows.get_mut(&id) else {
            return Ok(None);
        };
        if row.user_id != Some(owner) {
            return Ok(None);
        }
        row.name = name.to_string();
        Ok(Some(row.value().clone()))
    }

    async fn delete_owned(&self, owner: Uuid, id: i64) -> DbResult<u64> {
        let removed = self
            .rows
            .remove_if(&id, |_, r| r.user_id == Some(owner))
            .is_some();
        Ok(u64::from(removed))
    }
}

// =============================================================================
// Expenses
// =============================================================================

#[derive(Clone, Default)]
pub struct MockExpenseRepository {
    rows: Arc<DashMap<i64, ExpenseRow>>,
    next_id: Arc<AtomicI64>,
}

impl MockExpenseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    #[allow(dead_code)]
    pub fn len(&self) -> usize {
        self.rows.len()
    }
}

fn within(filter: &ExpenseFilter, row: &ExpenseRow) -> bool {
    if let Some(ref category) = filter.category {
        if &row.category != category {
            return false;
        }
    }
    if let Some(from) = filter.from {
        if row.date < from {
            return false;
        }
    }
    if let Some(to) = filter.to {
        if row.date > to {
            return false;
        }
    }
    true
}

#[async_trait]
impl ExpenseRepository for MockExpenseRepository {
    async fn list_visible(&self, owner: Uuid, filter: ExpenseFilter) -> DbResult<Vec<ExpenseRow>> {
        let mut rows: Vec<ExpenseRow> = self
            .rows
            .iter()
            .filter(|r| r.user_id == owner && within(&filter, r))
            .map(|r| r.value().clone())
            .collect();
        rows.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        Ok(rows)
    }

    async fn create(&self, owner: Uuid, expense: CreateExpense) -> DbResult<ExpenseRow> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let row = ExpenseRow {
            id,
            amount: expense.amount,
            currency: expense.currency,
            category: expense.category,
            description: expense.description,
            date: expense.date,
            user_id: owner,
        };
        self.rows.insert(id, row.clone());
        Ok(row)
    }

    async fn get_owned(&self, owner: Uuid, id: i64) -> DbResult<Option<ExpenseRow>> {
        Ok(self
            .rows
            .get(&id)
            .filter(|r| r.user_id == owner)
            .map(|r| r.value().clone()))
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: i64,
        patch: ExpensePatch,
    ) -> DbResult<Option<ExpenseRow>> {
        let Some(mut row) = self.rows.get_mut(&id) else {
            return Ok(None);
        };
        if row.user_id != owner {
            return Ok(None);
        }

        if let Some(amount) = patch.amount {
            row.amount = amount;
        }
        if let Some(currency) = patch.currency {
            row.currency = currency;
        }
        if let Some(category) = patch.category {
            row.category = category;
        }
        if let Some(description) = patch.description {
            row.description = Some(description);
        }
        if let Some(date) = patch.date {
            row.date = date;
        }
        Ok(Some(row.value().clone()))
    }

    async fn delete_owned(&self, owner: Uuid, id: i64) -> DbResult<u64> {
        let removed = self.rows.remove_if(&id, |_, r| r.user_id == owner).is_some();
        Ok(u64::from(removed))
    }

    async fn category_totals(&self, owner: Uuid) -> DbResult<Vec<CategoryTotalRow>> {
        let mut totals = std::collections::BTreeMap::<String, f64>::new();
        for r in self.rows.iter().filter(|r| r.user_id == owner) {
            *totals.entry(r.category.clone()).or_insert(0.0) += r.amount;
        }
        Ok(totals
            .into_iter()
            .map(|(category, total)| CategoryTotalRow { category, total })
            .collect())
    }
}

#[allow(dead_code)]
pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
}
