//! JSON response and error envelope encoding.
//!
//! # Wire Format
//! - Success: the payload serialized as JSON, status 200
//! - Failure: `{"error": "<message>"}`, always status 500
//!
//! The same envelope is decoded on the client side, so a message written by
//! `encode_error` comes back unchanged from `decode_error`.

use axum::{
    body::{Body, Bytes},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the JSON codec.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to encode response: {0}")]
    Serialization(#[source] serde_json::Error),

    #[error("failed to decode error body: {0}")]
    Decode(#[source] serde_json::Error),
}

/// The uniform error body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub error: String,
}

/// Error rebuilt from a decoded envelope. Displays as the bare message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ServiceError {
    pub message: String,
}

/// Serialize a response payload.
pub fn encode_response<T: Serialize + ?Sized>(payload: &T) -> Result<Bytes, CodecError> {
    serde_json::to_vec(payload)
        .map(Bytes::from)
        .map_err(CodecError::Serialization)
}

/// Build the envelope body for `message`.
pub fn encode_error_body(message: impl Into<String>) -> Bytes {
    let envelope = ErrorEnvelope {
        error: message.into(),
    };
    // A struct with a single string field always serializes.
    Bytes::from(serde_json::to_vec(&envelope).unwrap_or_default())
}

/// Parse an envelope body back into an error.
pub fn decode_error(body: &[u8]) -> Result<ServiceError, CodecError> {
    let envelope: ErrorEnvelope = serde_json::from_slice(body).map_err(CodecError::Decode)?;
    Ok(ServiceError {
        message: envelope.error,
    })
}

/// 200 response carrying an already encoded JSON body.
pub fn json_response(body: Bytes) -> Response {
    with_status(StatusCode::OK, body)
}

/// 500 response carrying the envelope for `err`.
pub fn encode_error(err: &dyn std::fmt::Display) -> Response {
    with_status(
        StatusCode::INTERNAL_SERVER_ERROR,
        encode_error_body(err.to_string()),
    )
}

pub(crate) fn with_status(status: StatusCode, body: Bytes) -> Response {
    let mut response = (status, Body::from(body)).into_response();
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}
