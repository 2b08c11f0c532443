use bcrypt::{hash, verify, DEFAULT_COST};

use crate::errors::AppResult;

/// Produce a salted bcrypt digest of the plaintext.
pub fn hash_password(plaintext: &str) -> AppResult<String> {
    Ok(hash(plaintext.as_bytes(), DEFAULT_COST)?)
}

/// Check a plaintext password against a stored digest. A malformed digest
/// verifies as false rather than surfacing an error.
pub fn verify_password(plaintext: &str, digest: &str) -> bool {
    verify(plaintext, digest).unwrap_or(false)
}
