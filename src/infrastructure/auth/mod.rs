//! Credential primitives: JWT codec and password hashing.

pub mod jwt;
pub mod password;

pub use jwt::{Claims, IssuedToken, JwtCodec};
