use thiserror::Error;

// Make the response module public
pub mod response;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("User with this username already exists")]
    DuplicateUser,

    // One error for unknown username and wrong password, so responses
    // cannot be used to enumerate usernames.
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Token has expired")]
    ExpiredToken,

    // Token verified, but the account it names no longer exists
    #[error("User not found")]
    UnknownSubject,

    #[error("Task not found")]
    NotFound,

    #[error("{0}")]
    Forbidden(String),

    // The #[from] attribute automatically converts a redis::RedisError
    // into an AppError::Storage using the From trait.
    #[error("Storage error: {0}")]
    Storage(#[from] redis::RedisError),

    #[error("Password hashing error: {0}")]
    Hashing(#[from] bcrypt::BcryptError),

    #[error("Failed to create token: {0}")]
    TokenCreation(#[from] jsonwebtoken::errors::Error),
}

// Custom result type
pub type AppResult<T> = Result<T, AppError>;
