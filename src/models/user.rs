use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Stored whole as a JSON document; endpoints answer with `UserOut`
// so the digest never leaves the service.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub password_hash: String,  // bcrypt digest, never the plaintext
}

/// Draft for a new account. Carries an already-hashed credential; the
/// plaintext password never reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub first_name: String,
    pub last_name: Option<String>,
    pub password_hash: String,
}
