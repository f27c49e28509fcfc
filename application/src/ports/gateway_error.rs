//! Errors crossing the provider boundary.

use thiserror::Error;

/// Errors from embedding or completion providers
///
/// These are never masked by the core; they propagate to the caller, which
/// owns retry and backoff policy.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}
