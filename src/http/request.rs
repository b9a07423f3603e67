//! Request decoding.
//!
//! # Responsibilities
//! - Generate a unique request ID (UUID v4) for every request
//! - Decode path values, query string and JSON body into a `CallRequest`
//! - Log each decode attempt and its failure
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - Body size bounded while reading, before JSON parsing
//! - An empty body decodes to `None`, not to JSON `null`

use std::future::Future;

use axum::body::Body;
use axum::http::{request::Parts, HeaderMap, HeaderValue, Request};
use tower_http::request_id::{MakeRequestId, RequestId};
use uuid::Uuid;

use crate::error::{TransportError, TransportResult};
use crate::routing::{decode_path_params, parse_query, query_params, PathParams};
use crate::service::CallRequest;

/// Header carrying the request ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// Issues a fresh UUID v4 for requests that arrive without an ID.
#[derive(Debug, Clone, Copy, Default)]
pub struct MakeRequestUuid;

impl MakeRequestId for MakeRequestUuid {
    fn make_request_id<B>(&mut self, _request: &Request<B>) -> Option<RequestId> {
        let value = HeaderValue::from_str(&Uuid::new_v4().to_string()).ok()?;
        Some(RequestId::new(value))
    }
}

/// The request ID header, or `"unknown"`.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}

/// Decode path values, query and body of a matched request.
pub async fn decode_call(
    parts: &Parts,
    body: Body,
    path_params: PathParams,
    max_body_size: usize,
) -> TransportResult<CallRequest> {
    let path_params = decode_path_params(path_params)?;
    let query = query_params(&parse_query(parts.uri.query().unwrap_or_default()));

    let bytes = axum::body::to_bytes(body, max_body_size)
        .await
        .map_err(TransportError::Body)?;
    let body = if bytes.is_empty() {
        None
    } else {
        Some(serde_json::from_slice::<serde_json::Value>(&bytes).map_err(TransportError::InvalidBody)?)
    };

    Ok(CallRequest {
        method: parts.method.clone(),
        path_params,
        query_params: query,
        body,
    })
}

/// Run `decode`, logging the request line and any failure.
pub async fn decode_logged<F>(parts: &Parts, decode: F) -> TransportResult<CallRequest>
where
    F: Future<Output = TransportResult<CallRequest>>,
{
    let request_id = request_id(&parts.headers);
    tracing::debug!(
        request_id = %request_id,
        method = %parts.method,
        url = %parts.uri,
        "Decoding request"
    );

    let result = decode.await;
    if let Err(e) = &result {
        tracing::warn!(
            request_id = %request_id,
            method = %parts.method,
            url = %parts.uri,
            error = %e,
            "Failed to decode request"
        );
    }
    result
}
