//! Request DTOs
//!
//! Data structures for API request bodies.

use serde::Deserialize;
use validator::Validate;

use crate::application::services::{NewUserDto, UpdateUserDto};

/// Account creation request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(length(min = 1, max = 64, message = "Lastname must be 1-64 characters"))]
    pub lastname: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    /// Absent and empty are both rejected by the service
    #[serde(default)]
    pub password: String,
}

impl From<CreateUserRequest> for NewUserDto {
    fn from(body: CreateUserRequest) -> Self {
        Self {
            name: body.name,
            lastname: body.lastname,
            email: body.email,
            password: body.password,
        }
    }
}

/// Profile update request, keyed by email
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 64, message = "Lastname must be 1-64 characters"))]
    pub lastname: Option<String>,
}

impl From<UpdateUserRequest> for UpdateUserDto {
    fn from(body: UpdateUserRequest) -> Self {
        Self {
            email: body.email,
            name: body.name,
            lastname: body.lastname,
        }
    }
}

/// Login request
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Change password request
#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    #[validate(length(min = 1, message = "Old password is required"))]
    pub old_password: String,

    #[validate(length(min = 1, message = "New password is required"))]
    pub new_password: String,
}

/// Random password request
#[derive(Debug, Deserialize)]
pub struct RandomPasswordRequest {
    pub length: usize,
}
