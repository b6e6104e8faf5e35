//! Domain Services
//!
//! Contracts for domain logic implemented outside the domain layer.

pub mod token_verifier;

pub use token_verifier::{TokenError, TokenVerifier};

#[cfg(test)]
pub use token_verifier::MockTokenVerifier;
