//! User profile handlers

use axum::Json;
use axum::extract::State;
use serde::{Deserialize, Serialize};
use tally_auth_core::ProfileChanges;
use tally_db::UserRow;

use crate::error::ApiResult;
use crate::extractors::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<UserRow> for UserResponse {
    fn from(user: UserRow) -> Self {
        Self {
            id: user.id.to_string(),
            username: user.username,
            email: user.email,
        }
    }
}

/// GET /users/me
///
/// Profile of the token's subject; no body, the token is the input
pub async fn get_me(user: AuthUser) -> Json<UserResponse> {
    Json(UserResponse {
        id: user.user_id.to_string(),
        username: user.username,
        email: user.email,
    })
}

/// PUT /users/me
///
/// Change email and/or password; omitted fields keep their value
pub async fn update_me(
    State(state): State<AppState>,
    user: AuthUser,
    Json(req): Json<UpdateProfileRequest>,
) -> ApiResult<Json<UserResponse>> {
    let updated = state
        .auth
        .update_profile(
            user.user_id,
            ProfileChanges {
                email: req.email,
                password: req.password,
            },
        )
        .await?;

    Ok(Json(UserResponse::from(updated)))
}
