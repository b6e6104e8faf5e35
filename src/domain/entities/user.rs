//! User entity and repository trait.
//!
//! Maps to the `users` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::AppError;

/// Represents a user account in the chat system.
///
/// Maps to the `users` table:
/// - id: UUID PRIMARY KEY
/// - name: VARCHAR(64) NOT NULL (stored lower-case)
/// - lastname: VARCHAR(64) NOT NULL (stored lower-case)
/// - email: VARCHAR(255) NOT NULL UNIQUE (stored lower-case)
/// - password_hash: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// - updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,

    pub name: String,

    pub lastname: String,

    /// Email address (unique business key)
    pub email: String,

    /// Argon2 PHC string, salt included
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Build a new account, normalising the case-insensitive fields.
    pub fn new(name: &str, lastname: &str, email: &str, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::now_v7(),
            name: name.trim().to_lowercase(),
            lastname: lastname.trim().to_lowercase(),
            email: normalize_email(email),
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Profile fields carried inside issued tokens.
    pub fn token_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "id": self.id,
            "name": self.name,
            "lastname": self.lastname,
            "email": self.email,
        })
    }
}

/// Emails are compared case-insensitively everywhere.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Repository trait for User data access operations.
///
/// Implementations of this trait handle the actual storage interactions.
/// The trait is defined in the domain layer to maintain dependency inversion.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their (normalised) email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// All users, oldest first.
    async fn list(&self) -> Result<Vec<User>, AppError>;

    /// Insert a new user. Fails with `AppError::Conflict` on a duplicate email.
    async fn create(&self, user: &User) -> Result<User, AppError>;

    /// Overwrite name and lastname of the user with the given email.
    async fn update_profile(
        &self,
        email: &str,
        name: Option<String>,
        lastname: Option<String>,
    ) -> Result<Option<User>, AppError>;

    /// Replace the password hash of the user with the given email.
    async fn update_password(&self, email: &str, password_hash: &str)
        -> Result<Option<User>, AppError>;

    /// Delete by ID, returning the removed row.
    async fn delete(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Cheap connectivity probe for readiness checks.
    async fn ping(&self) -> Result<(), AppError>;
}
