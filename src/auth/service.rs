use std::sync::Arc;

use chrono::Duration;

use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::TokenService;
use crate::errors::{AppError, AppResult};
use crate::models::{MessageResponse, NewUser, RegisterRequest, TokenResponse, User};
use crate::services::UserStore;

/// Registration, login and token-to-account resolution over the user
/// directory. Holds no mutable state of its own.
#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    tokens: TokenService,
    token_ttl: Duration,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, tokens: TokenService, token_ttl: Duration) -> Self {
        Self {
            users,
            tokens,
            token_ttl,
        }
    }

    /// Create a new account with a hashed credential. The existence check
    /// here is an optimization; the store's create is the authoritative
    /// uniqueness guarantee when two signups race.
    pub async fn register(&self, request: RegisterRequest) -> AppResult<MessageResponse> {
        if self
            .users
            .find_by_username(&request.username)
            .await?
            .is_some()
        {
            return Err(AppError::DuplicateUser);
        }

        let password_hash = hash_password(&request.password)?;
        self.users
            .create(NewUser {
                username: request.username,
                first_name: request.first_name,
                last_name: request.last_name,
                password_hash,
            })
            .await?;

        Ok(MessageResponse {
            message: "Registration complete!".to_string(),
        })
    }

    /// Validate credentials and issue a bearer token. Unknown username and
    /// wrong password are indistinguishable to the caller.
    pub async fn login(&self, username: &str, password: &str) -> AppResult<TokenResponse> {
        let user = self
            .users
            .find_by_username(username)
            .await?
            .ok_or(AppError::InvalidCredentials)?;

        if !verify_password(password, &user.password_hash) {
            tracing::warn!("Failed login attempt for user: {}", username);
            return Err(AppError::InvalidCredentials);
        }

        let access_token = self.tokens.issue(&user.username, self.token_ttl)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    pub fn verify_token(&self, token: &str) -> AppResult<String> {
        self.tokens.verify(token)
    }

    /// Resolve a verified token subject to its account record.
    pub async fn resolve_current_account(&self, subject: &str) -> AppResult<User> {
        self.users
            .find_by_username(subject)
            .await?
            .ok_or(AppError::UnknownSubject)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::store::memory::MemoryStore;

    fn auth_with_store() -> (AuthService, Arc<MemoryStore>) {
        let store = Arc::new(MemoryStore::default());
        let auth = AuthService::new(
            store.clone(),
            TokenService::new("test-secret-key-12345"),
            Duration::minutes(120),
        );
        (auth, store)
    }

    fn registration(username: &str, password: &str) -> RegisterRequest {
        RegisterRequest {
            username: username.to_string(),
            first_name: "Test".to_string(),
            last_name: None,
            password: password.to_string(),
        }
    }

    #[tokio::test]
    async fn second_registration_with_same_username_conflicts() {
        let (auth, _) = auth_with_store();

        let first = auth.register(registration("alice", "secret1")).await;
        assert_eq!(first.unwrap().message, "Registration complete!");

        let second = auth.register(registration("alice", "other")).await;
        assert!(matches!(second, Err(AppError::DuplicateUser)));
    }

    #[tokio::test]
    async fn store_backstop_catches_a_lost_registration_race() {
        let (auth, store) = auth_with_store();
        auth.register(registration("alice", "secret1")).await.unwrap();

        // A racing signup that already passed its pre-check lands on the
        // store create and still conflicts.
        let raced = store
            .create(NewUser {
                username: "alice".to_string(),
                first_name: "Other".to_string(),
                last_name: None,
                password_hash: hash_password("other").unwrap(),
            })
            .await;
        assert!(matches!(raced, Err(AppError::DuplicateUser)));
    }

    #[tokio::test]
    async fn stored_credential_is_a_digest_not_the_plaintext() {
        let (auth, store) = auth_with_store();
        auth.register(registration("alice", "secret1")).await.unwrap();

        let stored = store.find_by_username("alice").await.unwrap().unwrap();
        assert_ne!(stored.password_hash, "secret1");
        assert!(verify_password("secret1", &stored.password_hash));
    }

    #[tokio::test]
    async fn login_issues_a_verifiable_bearer_token() {
        let (auth, _) = auth_with_store();
        auth.register(registration("bob", "secret1")).await.unwrap();

        let response = auth.login("bob", "secret1").await.unwrap();
        assert_eq!(response.token_type, "bearer");
        assert_eq!(auth.verify_token(&response.access_token).unwrap(), "bob");

        let account = auth.resolve_current_account("bob").await.unwrap();
        assert_eq!(account.username, "bob");
    }

    #[tokio::test]
    async fn wrong_password_and_unknown_user_fail_identically() {
        let (auth, _) = auth_with_store();
        auth.register(registration("alice", "secret1")).await.unwrap();

        let wrong_password = auth.login("alice", "wrong").await;
        assert!(matches!(wrong_password, Err(AppError::InvalidCredentials)));

        let unknown_user = auth.login("nobody", "secret1").await;
        assert!(matches!(unknown_user, Err(AppError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn token_for_a_vanished_account_is_an_unknown_subject() {
        let (auth, _) = auth_with_store();

        let result = auth.resolve_current_account("ghost").await;
        assert!(matches!(result, Err(AppError::UnknownSubject)));
    }
}
