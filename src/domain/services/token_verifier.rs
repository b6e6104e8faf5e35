//! Token verification contract consumed by the realtime layer.

use async_trait::async_trait;

use crate::domain::Identity;

/// Reasons a credential can fail verification.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("missing token")]
    Missing,

    #[error("token expired")]
    Expired,

    #[error("invalid token: {0}")]
    Invalid(String),

    #[error("token payload has no email")]
    MissingEmail,
}

/// Verifies a bearer credential and yields the identity it carries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Identity, TokenError>;
}
