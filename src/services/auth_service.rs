//! Authentication service - Handles user registration and login.
//!
//! Orchestrates the password policy, the credential hasher, and the
//! user repository. Each call is stateless and single-shot.

use async_trait::async_trait;
use std::sync::Arc;

use crate::domain::{Password, PasswordPolicy, User};
use crate::errors::{AppError, AppResult};
use crate::infra::UserRepository;

/// Digest verified in place of a stored hash when the email is unknown,
/// keeping that failure path timing-comparable to a real mismatch.
const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$dummysalt123456$dummyhash1234567890123456789012";

/// Authentication service trait for dependency injection.
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a new user
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User>;

    /// Authenticate an email/password pair, returning the stored user
    async fn login(&self, email: String, password: String) -> AppResult<User>;
}

/// Concrete implementation of AuthService over a user repository.
pub struct Authenticator<R: UserRepository> {
    users: Arc<R>,
}

impl<R: UserRepository> Authenticator<R> {
    /// Create new auth service instance with its user repository
    pub fn new(users: Arc<R>) -> Self {
        Self { users }
    }
}

#[async_trait]
impl<R: UserRepository> AuthService for Authenticator<R> {
    async fn register(&self, name: String, email: String, password: String) -> AppResult<User> {
        // Email format is validated by the handler's ValidatedJson extractor
        if self.users.exists_by_email(&email).await? {
            return Err(AppError::EmailTaken);
        }

        // Persistence is attempted only after the policy accepts the
        // password; no partial state is left on failure.
        PasswordPolicy::validate(&password)?;

        let digest = Password::new(&password)?;
        let user = self.users.create(name, email, digest.into_string()).await?;

        tracing::info!(user_id = %user.id, "user registered");
        Ok(user)
    }

    async fn login(&self, email: String, password: String) -> AppResult<User> {
        let user = self.users.find_by_email(&email).await?;

        // SECURITY: verify against a dummy digest when the email is
        // unknown, so unknown-email and wrong-password failures stay
        // indistinguishable to the caller.
        let stored = match &user {
            Some(u) => Password::from_hash(u.password_hash.clone()),
            None => Password::from_hash(DUMMY_HASH.to_string()),
        };
        let password_valid = stored.verify(&password);

        match user {
            Some(u) if password_valid => Ok(u),
            _ => Err(AppError::InvalidCredentials),
        }
    }
}
