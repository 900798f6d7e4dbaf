//! Report handlers

use axum::Json;
use axum::extract::State;
use tally_types::SpendingSummary;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

/// GET /reports/summary
///
/// Per-category totals plus the grand total for the caller's expenses
pub async fn summary(
    State(state): State<AppState>,
    user: AuthUser,
) -> ApiResult<Json<SpendingSummary>> {
    let summary = state.ledger.summarize(user.user_id).await?;

    Ok(Json(summary))
}
