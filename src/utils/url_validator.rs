//! Validation of URLs submitted for shortening.
//!
//! URLs are stored exactly as submitted; this module only decides whether a
//! string is acceptable.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Schemes a shortened URL may use.
const ALLOWED_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Upper bound on stored URL length.
pub const MAX_URL_LENGTH: usize = 2048;

/// Checks that `raw` is a well-formed absolute URL with a host.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the URL is empty, too long, unparsable,
/// uses an unsupported scheme or has no host.
pub fn validate_original_url(raw: &str) -> Result<(), AppError> {
    if raw.trim().is_empty() {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "URL must not be empty" }),
        ));
    }

    if raw.len() > MAX_URL_LENGTH {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "URL is too long", "max_length": MAX_URL_LENGTH }),
        ));
    }

    let parsed = Url::parse(raw).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })?;

    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "Unsupported scheme", "scheme": parsed.scheme() }),
        ));
    }

    if parsed.host_str().is_none_or(str::is_empty) {
        return Err(AppError::bad_request(
            "Invalid URL format",
            json!({ "reason": "URL must have a host" }),
        ));
    }

    Ok(())
}
