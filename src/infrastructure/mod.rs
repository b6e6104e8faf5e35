//! Infrastructure Layer
//!
//! Implementations for external concerns:
//! - Database pool and repositories (PostgreSQL)
//! - Credential handling (JWT, Argon2)
//! - Prometheus metrics

pub mod auth;
pub mod database;
pub mod metrics;
pub mod repositories;
