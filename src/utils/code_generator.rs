//! Short code generation.
//!
//! Codes are drawn character by character, uniformly and independently, from a
//! 62-character alphanumeric alphabet using the thread-local CSPRNG, so the
//! sequence of issued codes cannot be predicted from earlier ones.

use rand::Rng;

/// Characters a generated code may contain.
pub const ALPHABET: &[u8; 62] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default length of generated codes (62^6 ≈ 56.8 billion combinations).
pub const DEFAULT_CODE_LENGTH: usize = 6;

/// Longest code accepted on lookup paths.
pub const MAX_CODE_LENGTH: usize = 64;

/// Codes that would shadow fixed routes.
pub const RESERVED_CODES: &[&str] = &["shorten", "stats", "metrics", "health"];

/// Source of candidate short codes.
///
/// The allocation resolver only depends on this trait so tests can force
/// specific candidate sequences.
#[cfg_attr(test, mockall::automock)]
pub trait CodeGenerator: Send + Sync {
    /// Produces a candidate of exactly `length` characters.
    fn generate(&self, length: usize) -> String;
}

/// Stateless generator backed by [`generate_code`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomCodeGenerator;

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self, length: usize) -> String {
        generate_code(length)
    }
}

/// Generates a random code of `length` characters from [`ALPHABET`].
///
/// # Examples
///
/// ```
/// use shortlink::utils::code_generator::generate_code;
///
/// let code = generate_code(6);
/// assert_eq!(code.len(), 6);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Returns true if `code` collides with a fixed route name.
pub fn is_reserved_code(code: &str) -> bool {
    RESERVED_CODES.contains(&code)
}

/// Returns true if `code` could have been issued by this service.
///
/// Lookups for anything else are answered as not found without touching storage.
pub fn is_well_formed_code(code: &str) -> bool {
    !code.is_empty()
        && code.len() <= MAX_CODE_LENGTH
        && code.bytes().all(|b| b.is_ascii_alphanumeric())
}
