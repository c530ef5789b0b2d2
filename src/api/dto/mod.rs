//! Data Transfer Objects for API requests and responses.
//!
//! Bodies use camelCase field names. Request DTOs are validated with
//! `validator` before they reach the service layer.

pub mod health;
pub mod metrics;
pub mod shorten;
pub mod stats;
