//! Application Layer
//!
//! Business logic services, DTOs and the realtime presence core. This layer
//! orchestrates the flow of data between the presentation and domain layers.

pub mod dto;
pub mod realtime;
pub mod services;
