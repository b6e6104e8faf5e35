//! # Domain Entities
//!
//! - **User**: account record with credentials and profile
//! - **Session**: one verified identity bound to one live socket connection
//!
//! ## Repository Traits
//!
//! Each persisted entity has an associated repository trait defining data
//! access operations. These traits are implemented in the infrastructure
//! layer, following the dependency inversion principle.

mod session;
mod user;

pub use session::{ConnectionId, Identity, Session};
pub use user::{normalize_email, User, UserRepository};

#[cfg(test)]
pub use user::MockUserRepository;
