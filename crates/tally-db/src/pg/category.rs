//! PostgreSQL category repository implementation
//!
//! Every statement that targets a single category carries
//! `id = $1 AND user_id = $2`, so rows owned by other users and ownerless
//! defaults fall out of the predicate exactly like absent rows.

use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::CategoryRow;
use crate::repo::CategoryRepository;

/// PostgreSQL category repository
#[derive(Clone)]
pub struct PgCategoryRepository {
    pool: PgPool,
}

impl PgCategoryRepository {
    /// Create a new category repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CategoryRepository for PgCategoryRepository {
    async fn list_visible(&self, owner: Uuid) -> DbResult<Vec<CategoryRow>> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, user_id
            FROM categories
            WHERE user_id = $1 OR user_id IS NULL
            ORDER BY name ASC
            "#,
        )
        .bind(owner)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn find_by_name(&self, owner: Uuid, name: &str) -> DbResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, user_id
            FROM categories
            WHERE user_id = $1 AND name = $2
            "#,
        )
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, owner: Uuid, name: &str) -> DbResult<CategoryRow> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            INSERT INTO categories (name, user_id)
            VALUES ($1, $2)
            RETURNING id, name, user_id
            "#,
        )
        .bind(name)
        .bind(owner)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn get_owned(&self, owner: Uuid, id: i64) -> DbResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            SELECT id, name, user_id
            FROM categories
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
        name: &str,
    ) -> DbResult<Option<CategoryRow>> {
        let row = sqlx::query_as::<_, CategoryRow>(
            r#"
            UPDATE categories
            SET name = $3
            WHERE id = $1 AND user_id = $2
            RETURNING id, name, user_id
            "#,
        )
        .bind(id)
        .bind(owner)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn delete_owned(&self, owner: Uuid, id: i64) -> DbResult<u64> {
        let result = sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(owner)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }
}
