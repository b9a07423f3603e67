//! HTTP client for services exposed through this transport.
//!
//! # Responsibilities
//! - Render a binding template into a concrete path
//! - Send the call with query parameters and an optional JSON body
//! - Decode the JSON result, or the error envelope on failure
//!
//! # Design Decisions
//! - Any non-success status is expected to carry the error envelope
//! - An error body that is not an envelope surfaces as `ClientError::Codec`

use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

use crate::codec::{decode_error, CodecError, ServiceError};
use crate::routing::{PathTemplate, TemplateError};

/// Errors returned by `RpcClient`.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The service answered with an error envelope.
    #[error("{source} (status {status})")]
    Remote {
        status: StatusCode,
        #[source]
        source: ServiceError,
    },

    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("invalid response body: {0}")]
    InvalidResponse(#[source] serde_json::Error),
}

impl ClientError {
    /// The remote message, if the service returned an envelope.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ClientError::Remote { source, .. } => Some(&source.message),
            _ => None,
        }
    }
}

/// A single call description.
#[derive(Debug, Clone)]
pub struct Call<'a> {
    pub method: Method,
    pub template: &'a str,
    pub path_params: HashMap<String, String>,
    pub query: Vec<(String, String)>,
}

impl<'a> Call<'a> {
    pub fn new(method: Method, template: &'a str) -> Self {
        Self {
            method,
            template,
            path_params: HashMap::new(),
            query: Vec::new(),
        }
    }

    pub fn path_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.path_params.insert(name.into(), value.into());
        self
    }

    pub fn query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// The concrete path for this call.
    pub fn path(&self) -> Result<String, TemplateError> {
        PathTemplate::parse(self.template)?.render(&self.path_params)
    }
}

/// Client bound to one base URL.
#[derive(Debug, Clone)]
pub struct RpcClient {
    client: Client,
    base_url: String,
}

impl RpcClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Perform `call` with no body.
    pub async fn call<T: DeserializeOwned>(&self, call: &Call<'_>) -> Result<T, ClientError> {
        self.send(call, None::<&()>).await
    }

    /// Perform `call` with a JSON body.
    pub async fn call_with_body<T, B>(&self, call: &Call<'_>, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        self.send(call, Some(body)).await
    }

    async fn send<T, B>(&self, call: &Call<'_>, body: Option<&B>) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let url = format!("{}{}", self.base_url, call.path()?);
        tracing::debug!(method = %call.method, url = %url, "Sending call");

        let mut request = self.client.request(call.method.clone(), &url);
        if !call.query.is_empty() {
            request = request.query(&call.query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if !status.is_success() {
            let source = decode_error(&bytes)?;
            tracing::debug!(status = %status, error = %source, "Call returned error envelope");
            return Err(ClientError::Remote { status, source });
        }

        serde_json::from_slice(&bytes).map_err(ClientError::InvalidResponse)
    }
}
