//! Category handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::{Deserialize, Serialize};
use tally_db::CategoryRow;
use tally_types::CategoryId;
use uuid::Uuid;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct CategoryPayload {
    pub name: String,
}

#[derive(Debug, Serialize)]
pub struct CategoryResponse {
    pub id: i64,
    pub name: String,
    /// `null` for the shared defaults
    pub user_id: Option<Uuid>,
}

impl From<CategoryRow> for CategoryResponse {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            user_id: row.user_id,
        }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /categories
///
/// The caller's categories plus the shared defaults, name-sorted
pub async fn list_categories(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<Vec<CategoryResponse>>> {
    let rows = state.ledger.list_categories(user.user_id).await?;

    Ok(Json(rows.into_iter().map(CategoryResponse::from).collect()))
}

/// POST /categories
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<CategoryPayload>,
) -> ApiResult<impl IntoResponse> {
    let row = state.ledger.create_category(user.user_id, &req.name).await?;

    Ok((StatusCode::CREATED, Json(CategoryResponse::from(row))))
}

/// PUT /categories/{id}
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
    Json(req): Json<CategoryPayload>,
) -> ApiResult<Json<CategoryResponse>> {
    let row = state
        .ledger
        .update_category(user.user_id, CategoryId(id), &req.name)
        .await?;

    Ok(Json(CategoryResponse::from(row)))
}

/// DELETE /categories/{id}
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    state
        .ledger
        .delete_category(user.user_id, CategoryId(id))
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
