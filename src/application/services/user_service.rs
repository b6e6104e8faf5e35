//! User Service
//!
//! Account management: create, list, update, delete, search.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{normalize_email, User, UserRepository};
use crate::infrastructure::auth::password;
use crate::shared::error::AppError;

/// User service trait
#[async_trait]
pub trait UserService: Send + Sync {
    /// Register a new account
    async fn create_user(&self, new_user: NewUserDto) -> Result<User, UserError>;

    /// All accounts; an empty store is an error
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Update name/lastname of the account with the given email
    async fn update_user(&self, update: UpdateUserDto) -> Result<User, UserError>;

    /// Delete an account by id
    async fn delete_user(&self, id: Uuid) -> Result<User, UserError>;

    /// Look an account up by email
    async fn search_by_email(&self, email: &str) -> Result<User, UserError>;
}

/// Input for account creation
#[derive(Debug, Clone)]
pub struct NewUserDto {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub password: String,
}

/// Profile update request
#[derive(Debug, Clone, Default)]
pub struct UpdateUserDto {
    pub email: String,
    pub name: Option<String>,
    pub lastname: Option<String>,
}

/// User service errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("User not found")]
    NotFound,

    #[error("no users")]
    NoUsers,

    #[error("bad request")]
    MissingPassword,

    #[error("Email already exists")]
    EmailTaken,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<UserError> for AppError {
    fn from(err: UserError) -> Self {
        match err {
            UserError::NotFound | UserError::NoUsers => AppError::NotFound(err.to_string()),
            UserError::MissingPassword => AppError::BadRequest(err.to_string()),
            UserError::EmailTaken => AppError::Conflict(err.to_string()),
            UserError::Internal(msg) => AppError::Internal(msg),
        }
    }
}

/// UserService implementation
pub struct UserServiceImpl {
    user_repo: Arc<dyn UserRepository>,
}

impl UserServiceImpl {
    pub fn new(user_repo: Arc<dyn UserRepository>) -> Self {
        Self { user_repo }
    }
}

#[async_trait]
impl UserService for UserServiceImpl {
    async fn create_user(&self, new_user: NewUserDto) -> Result<User, UserError> {
        if new_user.password.is_empty() {
            return Err(UserError::MissingPassword);
        }

        let password_hash = password::hash_password(&new_user.password)
            .map_err(|e| UserError::Internal(format!("Password hashing failed: {}", e)))?;

        let user = User::new(
            &new_user.name,
            &new_user.lastname,
            &new_user.email,
            password_hash,
        );

        let created = self.user_repo.create(&user).await.map_err(|e| match e {
            AppError::Conflict(_) => UserError::EmailTaken,
            e => UserError::Internal(e.to_string()),
        })?;

        tracing::info!(user_id = %created.id, email = %created.email, "User created");
        Ok(created)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        let users = self
            .user_repo
            .list()
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?;

        if users.is_empty() {
            return Err(UserError::NoUsers);
        }
        Ok(users)
    }

    async fn update_user(&self, update: UpdateUserDto) -> Result<User, UserError> {
        let email = normalize_email(&update.email);
        let name = update.name.map(|n| n.trim().to_lowercase());
        let lastname = update.lastname.map(|l| l.trim().to_lowercase());

        self.user_repo
            .update_profile(&email, name, lastname)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }

    async fn delete_user(&self, id: Uuid) -> Result<User, UserError> {
        let deleted = self
            .user_repo
            .delete(id)
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)?;

        tracing::info!(user_id = %deleted.id, "User deleted");
        Ok(deleted)
    }

    async fn search_by_email(&self, email: &str) -> Result<User, UserError> {
        self.user_repo
            .find_by_email(&normalize_email(email))
            .await
            .map_err(|e| UserError::Internal(e.to_string()))?
            .ok_or(UserError::NotFound)
    }
}
