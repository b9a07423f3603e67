//! The structured call interface behind each binding.
//!
//! The HTTP layer turns a request into a `CallRequest` (path params, query
//! params, optional JSON body) and hands it to an `Endpoint` together with
//! the request context. Any async function of the shape
//! `async fn(RequestContext, CallRequest) -> Result<T, E>` is an endpoint as
//! long as `T` serializes to JSON and `E` converts into a boxed error.

use std::future::Future;
use std::str::FromStr;

use axum::body::Bytes;
use axum::http::Method;
use futures_util::future::BoxFuture;
use futures_util::FutureExt;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::codec::encode_response;
use crate::context::RequestContext;
use crate::error::{BoxError, TransportError, TransportResult};
use crate::routing::{PathParams, QueryParams};

/// Decoded call parameters.
#[derive(Debug, Clone)]
pub struct CallRequest {
    pub method: Method,
    pub path_params: PathParams,
    pub query_params: QueryParams,
    pub body: Option<serde_json::Value>,
}

impl CallRequest {
    pub fn new(method: Method) -> Self {
        Self {
            method,
            path_params: PathParams::new(),
            query_params: QueryParams::new(),
            body: None,
        }
    }

    pub fn path(&self, name: &str) -> Option<&str> {
        self.path_params.get(name).map(String::as_str)
    }

    pub fn query(&self, name: &str) -> Option<&str> {
        self.query_params.get(name).map(String::as_str)
    }

    /// Raw parameter value. Path parameters shadow query parameters.
    pub fn raw(&self, name: &str) -> Option<&str> {
        self.path(name).or_else(|| self.query(name))
    }

    /// Parse a required parameter.
    pub fn param<T>(&self, name: &str) -> TransportResult<T>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.param_opt(name)?
            .ok_or_else(|| TransportError::MissingParam(name.to_string()))
    }

    /// Parse an optional parameter.
    pub fn param_opt<T>(&self, name: &str) -> TransportResult<Option<T>>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        self.raw(name)
            .map(|value| {
                value.parse::<T>().map_err(|e| TransportError::InvalidParam {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: e.to_string(),
                })
            })
            .transpose()
    }

    /// Deserialize the JSON body. A missing body deserializes from `null`.
    pub fn body_as<T: DeserializeOwned>(&self) -> TransportResult<T> {
        let value = self.body.clone().unwrap_or(serde_json::Value::Null);
        serde_json::from_value(value).map_err(TransportError::InvalidBody)
    }
}

/// Future returned by an endpoint: the encoded JSON payload or an error.
pub type EndpointFuture = BoxFuture<'static, TransportResult<Bytes>>;

/// A callable bound to a route.
pub trait Endpoint: Send + Sync + 'static {
    fn call(&self, ctx: RequestContext, call: CallRequest) -> EndpointFuture;
}

impl<F, Fut, T, E> Endpoint for F
where
    F: Fn(RequestContext, CallRequest) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Serialize + 'static,
    E: Into<BoxError> + 'static,
{
    fn call(&self, ctx: RequestContext, call: CallRequest) -> EndpointFuture {
        (self)(ctx, call)
            .map(|result| -> TransportResult<Bytes> {
                let payload = result.map_err(|e| TransportError::Handler(e.into()))?;
                Ok(encode_response(&payload)?)
            })
            .boxed()
    }
}
