//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with a single dispatching fallback
//! - Wire up middleware (request ID, tracing)
//! - Dispatch requests to the bound endpoints under the request timeout
//! - Record per-request metrics
//!
//! # Design Decisions
//! - The timeout is enforced inside `dispatch` rather than as a layer, so a
//!   request that runs out of time still gets the error envelope and 500

use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::{
    body::Body,
    extract::State,
    http::Request,
    response::Response,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::GatewayConfig;
use crate::context::{enrich_context, RequestContext};
use crate::error::TransportError;
use crate::http::request::{decode_call, decode_logged, request_id, MakeRequestUuid};
use crate::http::response::{not_found, respond};
use crate::lifecycle::shutdown::wait as wait_for_shutdown;
use crate::observability::metrics;
use crate::routing::Router as BindingRouter;

/// Application state injected into the dispatcher.
#[derive(Clone)]
pub struct AppState {
    pub bindings: Arc<BindingRouter>,
    pub max_body_size: usize,
    pub request_timeout: Duration,
}

/// HTTP server exposing a set of bindings.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and bindings.
    pub fn new(config: GatewayConfig, bindings: BindingRouter) -> Self {
        let state = AppState {
            bindings: Arc::new(bindings),
            max_body_size: config.security.max_body_size,
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .fallback(dispatch)
            .with_state(state)
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(
                TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                    tracing::info_span!(
                        "request",
                        request_id = %request_id(request.headers()),
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                }),
            )
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// The Axum router, for embedding or in-process testing.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server until `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(wait_for_shutdown(shutdown))
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Resolves the binding, decodes the call, and encodes its outcome.
async fn dispatch(State(state): State<AppState>, request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let (parts, body) = request.into_parts();
    let method_str = parts.method.to_string();
    let path = parts.uri.path().to_string();

    let Some((binding, path_params)) = state.bindings.resolve(&parts.method, &path) else {
        tracing::warn!(
            request_id = %request_id(&parts.headers),
            method = %parts.method,
            path = %path,
            "No binding matched"
        );
        metrics::record_request(&method_str, 404, "none", start_time);
        return not_found(&parts.method, &path);
    };

    let call = async {
        let decoded = decode_logged(
            &parts,
            decode_call(&parts, body, path_params, state.max_body_size),
        )
        .await;
        let call = match decoded {
            Ok(call) => call,
            Err(e) => return Err(e),
        };
        let ctx = enrich_context(&RequestContext::background(), &parts.headers);
        binding.endpoint.call(ctx, call).await
    };

    let result = tokio::time::timeout(state.request_timeout, call)
        .await
        .unwrap_or(Err(TransportError::Timeout(state.request_timeout)));

    if let Err(e) = &result {
        tracing::error!(
            request_id = %request_id(&parts.headers),
            binding = %binding.name,
            kind = e.kind(),
            error = %e,
            "Call failed"
        );
    }

    let response = respond(&result);
    metrics::record_request(
        &method_str,
        response.status().as_u16(),
        &binding.name,
        start_time,
    );
    response
}
