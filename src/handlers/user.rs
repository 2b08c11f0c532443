use axum::{extract::State, response::Json};

use crate::errors::AppResult;
use crate::models::UserOut;
use crate::AppState;

/// Public listing of registered accounts, ordered by username.
#[axum::debug_handler]
pub async fn list_users(State(state): State<AppState>) -> AppResult<Json<Vec<UserOut>>> {
    let users = state.users.list_all().await?;
    Ok(Json(users.iter().map(UserOut::from).collect()))
}
