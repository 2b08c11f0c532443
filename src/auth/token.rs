use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};

/// JWT claims payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: i64,
}

/// Issues and verifies HS256-signed identity tokens. The signing secret is
/// injected at construction; rotating it invalidates all outstanding tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenService {
    pub fn new(secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
        }
    }

    /// Sign a token binding `subject` to an absolute expiry of now + ttl.
    pub fn issue(&self, subject: &str, ttl: Duration) -> AppResult<String> {
        let claims = Claims {
            sub: subject.to_string(),
            exp: (Utc::now() + ttl).timestamp(),
        };

        tracing::debug!("Issuing token for subject: {}", claims.sub);
        Ok(encode(&Header::default(), &claims, &self.encoding_key)?)
    }

    /// Decode a token and return its subject. Signature and structure are
    /// checked before expiry, with no expiry leeway.
    pub fn verify(&self, token: &str) -> AppResult<String> {
        let mut validation = Validation::default();
        validation.leeway = 0;

        match decode::<Claims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(data.claims.sub),
            Err(e) => match e.kind() {
                ErrorKind::ExpiredSignature => Err(AppError::ExpiredToken),
                _ => Err(AppError::InvalidToken),
            },
        }
    }
}
