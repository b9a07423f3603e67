//! Response construction.
//!
//! # Responsibilities
//! - Turn an endpoint result into an HTTP response
//! - Answer requests no binding claims
//!
//! # Design Decisions
//! - Every call failure maps to 500 with the error envelope; the error
//!   kind only shows up in logs and metrics
//! - A request with no binding is 404, still with the envelope body

use axum::body::Bytes;
use axum::http::{Method, StatusCode};
use axum::response::Response;

use crate::codec::{encode_error, encode_error_body, json_response, with_status};
use crate::error::TransportResult;

/// Encode the outcome of a call.
pub fn respond(result: &TransportResult<Bytes>) -> Response {
    match result {
        Ok(body) => json_response(body.clone()),
        Err(e) => encode_error(e),
    }
}

/// 404 for a request no binding matched.
pub fn not_found(method: &Method, path: &str) -> Response {
    with_status(
        StatusCode::NOT_FOUND,
        encode_error_body(format!("no binding for {method} {path}")),
    )
}
