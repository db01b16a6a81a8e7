//! Error types for the posts client.

use thiserror::Error;

/// Result type for collaborator calls.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Errors reported by the Spotlist API collaborator.
///
/// Transport failures, non-2xx responses, and malformed payloads all land
/// here. The flow never interprets these; it carries the message into the
/// typed response's `error` field and stops the protocol at the current
/// stage.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Connection failed, timed out, or another transport-level error.
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The server answered with a non-2xx status.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body, unmodified.
        message: String,
    },

    /// The response body could not be decoded.
    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Client configuration error (missing token, bad base URL).
    #[error("configuration error: {0}")]
    Config(String),
}

/// Fail-fast errors raised while building a
/// [`ReviewPostRequest`](crate::requests::ReviewPostRequest) from raw form
/// input.
///
/// Unlike [`Validate::validate`](crate::validation::Validate::validate),
/// which accumulates and reports, these abort construction immediately.
/// The asymmetry is intentional: review submission is the one path whose
/// callers depend on construction failing loudly.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ReviewFormError {
    /// Rating outside the closed interval [1.0, 5.0].
    #[error("rating {rating} is out of range (1.0-5.0)")]
    RatingOutOfRange { rating: f64 },

    /// Zero or negative user id.
    #[error("user id {user_id} must be a positive integer")]
    NonPositiveUserId { user_id: i64 },

    /// Zero or negative spot id.
    #[error("spot id {spot_id} must be a positive integer")]
    NonPositiveSpotId { spot_id: i64 },
}
