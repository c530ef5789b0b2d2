//! Core domain entities.
//!
//! The service has a single persisted entity, [`ShortLink`], plus the
//! [`LinkSnapshot`] projection held by the read cache and the [`NewShortLink`]
//! input used when allocating a code.

pub mod link;

pub use link::{LinkSnapshot, NewShortLink, ShortLink};
