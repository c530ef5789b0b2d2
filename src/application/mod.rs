//! Application layer services implementing business logic.
//!
//! Services consume repository and cache traits and give HTTP handlers a small
//! API to work with.
//!
//! - [`services::link_service::LinkService`] - Code allocation, lookup and visit counting
//! - [`visit_worker::run_visit_worker`] - Background consumer for best-effort visit events

pub mod services;
pub mod visit_worker;
