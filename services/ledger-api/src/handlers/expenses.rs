//! Expense handlers

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tally_db::{CreateExpense, ExpenseFilter, ExpensePatch, ExpenseRow};
use tally_types::ExpenseId;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

fn default_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize)]
pub struct CreateExpenseRequest {
    pub amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    pub date: NaiveDate,
}

/// Partial update; omitted fields keep their stored value
#[derive(Debug, Default, Deserialize)]
pub struct UpdateExpenseRequest {
    pub amount: Option<f64>,
    pub currency: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Listing filters; all optional, combined with AND, date bounds inclusive
#[derive(Debug, Default, Deserialize)]
pub struct ExpenseQuery {
    pub category: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct ExpenseResponse {
    pub id: i64,
    pub amount: f64,
    pub currency: String,
    pub category: String,
    pub description: Option<String>,
    pub date: NaiveDate,
}

impl From<ExpenseRow> for ExpenseResponse {
    fn from(row: ExpenseRow) -> Self {
        Self {
            id: row.id,
            amount: row.amount,
            currency: row.currency,
            category: row.category,
            description: row.description,
            date: row.date,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /expenses?category=&from=&to=
pub async fn list_expenses(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<ExpenseQuery>,
) -> ApiResult<Json<Vec<ExpenseResponse>>> {
    let filter = ExpenseFilter {
        category: query.category,
        from: query.from,
        to: query.to,
    };
    let rows = state.ledger.list_expenses(user.user_id, filter).await?;

    Ok(Json(rows.into_iter().map(ExpenseResponse::from).collect()))
}

/// POST /expenses
pub async fn create_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CreateExpenseRequest>,
) -> ApiResult<impl IntoResponse> {
    let row = state
        .ledger
        .create_expense(
            user.user_id,
            CreateExpense {
                amount: req.amount,
                currency: req.currency,
                category: req.category,
                description: req.description,
                date: req.date,
            },
        )
        .await?;

    Ok((StatusCode::CREATED, Json(ExpenseResponse::from(row))))
}

/// GET /expenses/{id}
pub async fn get_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<Json<ExpenseResponse>> {
    let row = state.ledger.get_expense(user.user_id, ExpenseId(id)).await?;

    Ok(Json(ExpenseResponse::from(row)))
}

/// PUT /expenses/{id}
pub async fn update_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<UpdateExpenseRequest>,
) -> ApiResult<Json<ExpenseResponse>> {
    let patch = ExpensePatch {
        amount: req.amount,
        currency: req.currency,
        category: req.category,
        description: req.description,
        date: req.date,
    };
    let row = state
        .ledger
        .update_expense(user.user_id, ExpenseId(id), patch)
        .await?;

    Ok(Json(ExpenseResponse::from(row)))
}

/// DELETE /expenses/{id}
pub async fn delete_expense(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .ledger
        .delete_expense(user.user_id, ExpenseId(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
