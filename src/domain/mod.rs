//! # Domain Layer
//!
//! Core business types of the chat server, independent of any framework or
//! infrastructure concern.
//!
//! - **entities**: users and realtime sessions
//! - **services**: contracts (token verification) implemented elsewhere

pub mod entities;
pub mod services;

pub use entities::*;
pub use services::*;
