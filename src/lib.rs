//! RPC-over-HTTP transport adapter.
//!
//! Maps URL-templated HTTP requests onto structured endpoint calls and
//! encodes their results (or failures) back as JSON.

pub mod client;
pub mod codec;
pub mod config;
pub mod context;
pub mod error;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;
pub mod service;

pub use client::RpcClient;
pub use config::GatewayConfig;
pub use context::{enrich_context, RequestContext};
pub use error::{TransportError, TransportResult};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use routing::{build_param_map, path_params, query_params, Router};
pub use service::{CallRequest, Endpoint};
