//! Authentication Service
//!
//! Handles login/logout, password management, and bearer-token validation.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dashmap::{mapref::entry::Entry, DashMap};
use serde::Serialize;

use crate::domain::{normalize_email, Identity, TokenError, UserRepository};
use crate::infrastructure::auth::{password, JwtCodec};
use crate::shared::error::AppError;

/// Shortest password `random_password` will produce
pub const MIN_RANDOM_PASSWORD_LENGTH: usize = 8;
/// Longest password `random_password` will produce
pub const MAX_RANDOM_PASSWORD_LENGTH: usize = 128;

/// Authentication service trait for dependency injection
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Authenticate with credentials and open a login session
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError>;

    /// Close the login session of `email`
    async fn logout(&self, email: &str) -> Result<(), AuthError>;

    /// Replace the password of `email` after checking the old one
    async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError>;

    /// Generate a random alphanumeric password
    fn random_password(&self, length: usize) -> Result<String, AuthError>;

    /// Validate a bearer token belonging to a live login session
    async fn validate_token(&self, access_token: &str) -> Result<Identity, AuthError>;
}

/// Login response payload
#[derive(Debug, Clone, Serialize)]
pub struct AuthToken {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Authentication errors
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("User not found")]
    UserNotFound,

    #[error("already logged in")]
    AlreadyLoggedIn,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token")]
    InvalidToken,

    #[error("Session not found or expired")]
    SessionNotFound,

    #[error(
        "Password length must be between {} and {}",
        MIN_RANDOM_PASSWORD_LENGTH,
        MAX_RANDOM_PASSWORD_LENGTH
    )]
    InvalidLength,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::UserNotFound => AppError::NotFound(err.to_string()),
            AuthError::InvalidLength => AppError::BadRequest(err.to_string()),
            AuthError::Internal(msg) => AppError::Internal(msg),
            AuthError::InvalidCredentials
            | AuthError::AlreadyLoggedIn
            | AuthError::TokenExpired
            | AuthError::InvalidToken
            | AuthError::SessionNotFound => AppError::Unauthorized(err.to_string()),
        }
    }
}

/// AuthService implementation
pub struct AuthServiceImpl {
    user_repo: Arc<dyn UserRepository>,
    jwt: JwtCodec,
    /// Lower-cased email -> expiry of the token issued at login
    sessions: DashMap<String, DateTime<Utc>>,
}

impl AuthServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>, jwt: JwtCodec) -> Self {
        Self {
            user_repo,
            jwt,
            sessions: DashMap::new(),
        }
    }

    /// Whether `email` holds an unexpired login session.
    pub fn is_logged_in(&self, email: &str) -> bool {
        self.sessions
            .get(&normalize_email(email))
            .is_some_and(|expires_at| *expires_at > Utc::now())
    }
}

#[async_trait]
impl AuthService for AuthServiceImpl {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken, AuthError> {
        let email = normalize_email(email);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        let valid = password::verify_password(password, &user.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let issued = self
            .jwt
            .issue(&user)
            .map_err(|e| AuthError::Internal(format!("Token generation failed: {}", e)))?;

        // Check and insert under the same shard lock so two logins cannot both win.
        match self.sessions.entry(email.clone()) {
            Entry::Occupied(entry) if *entry.get() > Utc::now() => {
                return Err(AuthError::AlreadyLoggedIn);
            }
            Entry::Occupied(mut entry) => {
                entry.insert(issued.expires_at);
            }
            Entry::Vacant(entry) => {
                entry.insert(issued.expires_at);
            }
        }

        tracing::info!(email = %email, "User logged in");

        Ok(AuthToken {
            token: issued.token,
            token_type: "Bearer".to_string(),
            expires_in: issued.expires_in,
        })
    }

    async fn logout(&self, email: &str) -> Result<(), AuthError> {
        let email = normalize_email(email);
        if self.sessions.remove(&email).is_some() {
            tracing::info!(email = %email, "User logged out");
        }
        Ok(())
    }

    async fn change_password(
        &self,
        email: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), AuthError> {
        let email = normalize_email(email);

        let user = self
            .user_repo
            .find_by_email(&email)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        let valid = password::verify_password(old_password, &user.password_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid password hash: {}", e)))?;
        if !valid {
            return Err(AuthError::InvalidCredentials);
        }

        let new_hash = password::hash_password(new_password)
            .map_err(|e| AuthError::Internal(format!("Password hashing failed: {}", e)))?;

        self.user_repo
            .update_password(&email, &new_hash)
            .await
            .map_err(|e| AuthError::Internal(e.to_string()))?
            .ok_or(AuthError::UserNotFound)?;

        tracing::info!(email = %email, "Password changed");
        Ok(())
    }

    fn random_password(&self, length: usize) -> Result<String, AuthError> {
        if !(MIN_RANDOM_PASSWORD_LENGTH..=MAX_RANDOM_PASSWORD_LENGTH).contains(&length) {
            return Err(AuthError::InvalidLength);
        }
        Ok(password::random_password(length))
    }

    async fn validate_token(&self, access_token: &str) -> Result<Identity, AuthError> {
        let identity = self.jwt.decode(access_token).map_err(|e| match e {
            TokenError::Expired => AuthError::TokenExpired,
            _ => AuthError::InvalidToken,
        })?;

        if !self.is_logged_in(identity.email()) {
            return Err(AuthError::SessionNotFound);
        }
        Ok(identity)
    }
}
