//! PostgreSQL expense repository implementation
//!
//! Single-row statements carry `id = $1 AND user_id = $2`; list and
//! aggregate queries carry the owner in their WHERE clause. The optional
//! list filters are NULL-tolerant binds, so one static statement covers
//! every filter combination.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{CategoryTotalRow, ExpenseRow};
use crate::repo::{CreateExpense, ExpenseFilter, ExpensePatch, ExpenseRepository};

/// PostgreSQL expense repository
#[derive(Clone)]
pub struct PgExpenseRepository {
    pool: PgPool,
}

impl PgExpenseRepository {
    /// Create a new expense repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ExpenseRepository for PgExpenseRepository {
    async fn list_visible(&self, owner: Uuid, filter: ExpenseFilter) -> DbResult<Vec<ExpenseRow>> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, amount, currency, category, description, date, user_id
            FROM expenses
            WHERE user_id = $1
              AND ($2::VARCHAR IS NULL OR category = $2)
              AND ($3::DATE IS NULL OR date >= $3)
              AND ($4::DATE IS NULL OR date <= $4)
            ORDER BY date DESC, id DESC
            "#,
        )
        .bind(owner)
        .bind(&filter.category)
        .bind(filter.from)
        .bind(filter.to)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn create(&self, owner: Uuid, expense: CreateExpense) -> DbResult<ExpenseRow> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            INSERT INTO expenses (amount, currency, category, description, date, user_id)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, amount, currency, category, description, date, user_id
            "#,
        )
        .bind(expense.amount)
        .bind(&expense.currency)
        .bind(&expense.category)
        .bind(&expense.description)
        .bind(expense.date)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_owned(&self, owner: Uuid, id: i64) -> DbResult<Option<ExpenseRow>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT id, amount, currency, category, description, date, user_id
            FROM expenses
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(id)
        .bind(owner)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn update_owned(
        &self,
        owner: Uuid,
        id: i64,
        patch: ExpensePatch,
    ) -> DbResult<Option<ExpenseRow>> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            UPDATE expenses
            SET amount = COALESCE($3, amount),
                currency = COALESCE($4, currency),
                category = COALESCE($5, category),
                description = COALESCE($6, description),
                date = COALESCE($7, date)
            WHERE id = $1 AND user_id = $2
            RETURNING id, amount, currency, category, description, date, user_id
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(patch.amount)
        .bind(&patch.currency)
        .bind(&patch.category)
        .bind(&patch.description)
        .bind(patch.date)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_owned(&self, owner: Uuid, id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM expenses WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    async fn category_totals(&self, owner: Uuid) -> DbResult<Vec<CategoryTotalRow>> {
        let rows = sqlx::query_as::<_, CategoryTotalRow>(
            r#"
            SELECT category, SUM(amount) AS total
            FROM expenses
            WHERE user_id = $1
            GROUP BY category
            ORDER BY category ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
