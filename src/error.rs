//! Transport error taxonomy.

use std::time::Duration;

use thiserror::Error;

use crate::codec::CodecError;
use crate::routing::MatchError;

/// Boxed error returned by endpoint handlers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised between the HTTP request and the endpoint result.
///
/// All of them leave the server through the same error envelope and the
/// same status code; the variant is only visible in logs.
#[derive(Debug, Error)]
pub enum TransportError {
    /// Path did not fit the binding template.
    #[error(transparent)]
    Match(#[from] MatchError),

    /// Response payload could not be encoded.
    #[error(transparent)]
    Codec(#[from] CodecError),

    /// The request body could not be read.
    #[error("failed to read request body: {0}")]
    Body(#[source] axum::Error),

    /// The request body is not valid JSON.
    #[error("invalid JSON request body: {0}")]
    InvalidBody(#[source] serde_json::Error),

    /// A required path or query parameter is absent.
    #[error("missing parameter `{0}`")]
    MissingParam(String),

    /// A parameter is present but does not parse into the expected type.
    #[error("invalid value `{value}` for parameter `{name}`: {reason}")]
    InvalidParam {
        name: String,
        value: String,
        reason: String,
    },

    /// Decoding and the endpoint together ran past the request timeout.
    #[error("request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    /// Error returned by the endpoint itself.
    #[error("{0}")]
    Handler(BoxError),
}

impl TransportError {
    /// Short label for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            TransportError::Match(_) => "match",
            TransportError::Codec(_) => "codec",
            TransportError::Body(_) => "body",
            TransportError::InvalidBody(_) => "invalid_body",
            TransportError::MissingParam(_) => "missing_param",
            TransportError::InvalidParam { .. } => "invalid_param",
            TransportError::Timeout(_) => "timeout",
            TransportError::Handler(_) => "handler",
        }
    }
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
