//! DTOs for link shortening endpoint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to shorten a URL.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ShortenRequest {
    #[validate(url(message = "Invalid URL format"))]
    #[schema(example = "https://example.com/some/long/path")]
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShortenResponse {
    #[schema(example = "http://localhost:3000/abc123")]
    pub short_url: String,
}
