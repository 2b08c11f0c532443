use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::errors::{AppError, AppResult};
use crate::AppState;

/// Gate for protected routes: verify the bearer token, resolve its subject
/// to an account, and hand the account to handlers via request extensions.
pub async fn require_auth(
    State(state): State<AppState>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut req: Request,
    next: Next,
) -> AppResult<Response> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;

    let subject = state.auth.verify_token(bearer.token())?;
    let account = state.auth.resolve_current_account(&subject).await?;

    req.extensions_mut().insert(account);
    Ok(next.run(req).await)
}
