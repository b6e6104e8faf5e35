//! Repository Implementations
//!
//! PostgreSQL implementations of domain repository traits.

pub mod user_repository;

pub use user_repository::PgUserRepository;
