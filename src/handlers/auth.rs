use axum::{
    extract::{Form, State},
    response::Json,
};

use crate::errors::AppResult;
use crate::models::{LoginRequest, MessageResponse, RegisterRequest, TokenResponse};
use crate::AppState;

#[axum::debug_handler]
pub async fn signup(
    State(state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> AppResult<Json<MessageResponse>> {
    tracing::info!("Signup attempt for user: {}", request.username);
    Ok(Json(state.auth.register(request).await?))
}

// Login takes form-encoded credentials, as OAuth2 password clients send them.
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Form(request): Form<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    tracing::info!("Login attempt for user: {}", request.username);
    Ok(Json(
        state.auth.login(&request.username, &request.password).await?,
    ))
}
