//! # Presence Chat Library
//!
//! A chat backend built around a realtime presence and broadcast core:
//! - WebSocket endpoint with token-authenticated, one-session-per-email admission
//! - Presence registry and event relay (chat, typing, directed messages)
//! - REST account management and login sessions
//! - PostgreSQL for persistent storage
//!
//! ## Architecture
//!
//! - **Domain Layer**: entities, repository and token-verifier traits
//! - **Application Layer**: services, DTOs and the realtime core
//! - **Infrastructure Layer**: database, JWT/Argon2, metrics
//! - **Presentation Layer**: HTTP handlers and the WebSocket transport
//!
//! ```text
//! presence_chat/
//! +-- config/         Configuration management
//! +-- domain/         Entities and traits
//! +-- application/    Services, DTOs, realtime core
//! +-- infrastructure/ Database, auth primitives, metrics
//! +-- presentation/   HTTP routes and WebSocket handlers
//! +-- shared/         Errors and validation helpers
//! ```

// Configuration module
pub mod config;

// Domain layer - Core business logic
pub mod domain;

// Application layer - Business services
pub mod application;

// Infrastructure layer - External implementations
pub mod infrastructure;

// Presentation layer - HTTP and WebSocket handlers
pub mod presentation;

// Shared utilities
pub mod shared;

// Application startup and state management
pub mod startup;

// Telemetry and observability
pub mod telemetry;
