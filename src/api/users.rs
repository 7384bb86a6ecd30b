//! User listing endpoint

use axum::{extract::State, Json};

use crate::{error::AppResult, models::user::UserShort};

/// List users (password hashes are never returned)
#[utoipa::path(
    get,
    path = "/users",
    tag = "users",
    responses(
        (status = 200, description = "List of users", body = Vec<UserShort>)
    )
)]
pub async fn list_users(State(state): State<crate::AppState>) -> AppResult<Json<Vec<UserShort>>> {
    let users = state.services.users.list().await?;
    Ok(Json(users))
}
