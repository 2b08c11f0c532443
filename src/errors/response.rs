use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::json;

use crate::errors::AppError;

// The IntoResponse trait implementation converts AppError into a well-formed
// HTTP response with the status code each error kind maps to.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, detail) = match &self {
            AppError::DuplicateUser => (StatusCode::CONFLICT, self.to_string()),

            AppError::InvalidCredentials
            | AppError::InvalidToken
            | AppError::ExpiredToken
            | AppError::UnknownSubject => (StatusCode::UNAUTHORIZED, self.to_string()),

            AppError::NotFound => (StatusCode::NOT_FOUND, self.to_string()),

            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),

            // Infrastructure details stay in the server log
            AppError::Storage(_) | AppError::Hashing(_) | AppError::TokenCreation(_) => {
                tracing::error!("{}", self);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}
