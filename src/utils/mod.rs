//! Helper functions used across the application.
//!
//! - [`code_generator`] - Short code generation and code format checks
//! - [`url_validator`] - Validation of URLs submitted for shortening

pub mod code_generator;
pub mod url_validator;
