//! Application Services
//!
//! Business logic services that coordinate domain operations.
//!
//! - **AuthService**: login sessions, JWT tokens, password management
//! - **UserService**: account management

pub mod auth_service;
pub mod user_service;

pub use auth_service::{AuthError, AuthService, AuthServiceImpl, AuthToken};
pub use user_service::{NewUserDto, UpdateUserDto, UserError, UserService, UserServiceImpl};
