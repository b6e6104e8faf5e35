//! Response DTOs
//!
//! Data structures for API response bodies.

use serde::Serialize;

use crate::application::services::AuthToken;
use crate::domain::User;

/// User response
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id.to_string(),
            name: user.name,
            lastname: user.lastname,
            email: user.email,
            created_at: user.created_at.to_rfc3339(),
            updated_at: user.updated_at.to_rfc3339(),
        }
    }
}

/// User list response
#[derive(Debug, Serialize)]
pub struct UserListResponse {
    pub users: Vec<UserResponse>,
    pub total: usize,
}

impl From<Vec<User>> for UserListResponse {
    fn from(users: Vec<User>) -> Self {
        let users: Vec<UserResponse> = users.into_iter().map(UserResponse::from).collect();
        Self {
            total: users.len(),
            users,
        }
    }
}

/// Public projection returned by email search
#[derive(Debug, Serialize)]
pub struct UserSearchResponse {
    pub name: String,
    pub lastname: String,
    pub email: String,
}

impl From<User> for UserSearchResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name,
            lastname: user.lastname,
            email: user.email,
        }
    }
}

/// Login response
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
    pub token_type: String,
    pub expires_in: i64,
}

impl From<AuthToken> for TokenResponse {
    fn from(token: AuthToken) -> Self {
        Self {
            token: token.token,
            token_type: token.token_type,
            expires_in: token.expires_in,
        }
    }
}

/// Generated password
#[derive(Debug, Serialize)]
pub struct RandomPasswordResponse {
    pub password: String,
}

/// Generic acknowledgement
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Who is connected to the realtime endpoint right now
#[derive(Debug, Serialize)]
pub struct PresenceResponse {
    pub clients: usize,
    pub emails: Vec<String>,
}
