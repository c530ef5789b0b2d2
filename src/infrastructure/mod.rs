//! Infrastructure layer for external integrations.
//!
//! Implements the contracts defined by the domain layer.
//!
//! - [`cache`] - Read cache implementations (moka and no-op)
//! - [`persistence`] - Link storage (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
