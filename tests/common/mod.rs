//! Shared utilities for integration testing.

use std::net::SocketAddr;
use std::time::Duration;

use axum::http::Method;
use rpc_bridge::{
    CallRequest, GatewayConfig, HttpServer, RequestContext, Router, RpcClient, Shutdown,
    TransportError,
};
use serde_json::{json, Value};
use tokio::net::TcpListener;

async fn lookup(ctx: RequestContext, call: CallRequest) -> Result<Value, TransportError> {
    let id: u64 = call.param("id")?;
    let verbose: bool = call.param_opt("verbose")?.unwrap_or(false);
    Ok(json!({
        "id": id,
        "shelf": call.param::<String>("shelf")?,
        "verbose": verbose,
        "tenant": ctx.get("x-tenant"),
    }))
}

async fn rename(_ctx: RequestContext, call: CallRequest) -> Result<Value, TransportError> {
    #[derive(serde::Deserialize)]
    struct Rename {
        name: String,
    }

    let id: u64 = call.param("id")?;
    let body: Rename = call.body_as()?;
    Ok(json!({ "id": id, "name": body.name }))
}

async fn nap(_ctx: RequestContext, call: CallRequest) -> Result<Value, TransportError> {
    let secs: u64 = call.param("secs")?;
    tokio::time::sleep(Duration::from_secs(secs)).await;
    Ok(json!({ "slept": secs }))
}

async fn reject(_ctx: RequestContext, _call: CallRequest) -> Result<(), String> {
    Err("shelf is read-only".to_string())
}

/// Bindings served by `start_server`.
pub fn library_bindings() -> Router {
    Router::new()
        .route(Method::GET, "/v1/shelves/{shelf}/books/{id}", "lookup", lookup)
        .unwrap()
        .route(Method::PUT, "/v1/shelves/{shelf}/books/{id}", "rename", rename)
        .unwrap()
        .route(Method::DELETE, "/v1/shelves/{shelf}", "reject", reject)
        .unwrap()
        .route(Method::GET, "/v1/naps/{secs}", "nap", nap)
        .unwrap()
}

/// Start a server on an ephemeral port; returns its address and the
/// coordinator that stops it.
pub async fn start_server() -> (SocketAddr, Shutdown) {
    start_server_with(GatewayConfig::default()).await
}

/// `start_server` with an explicit configuration.
pub async fn start_server_with(config: GatewayConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config, library_bindings());
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (addr, shutdown)
}

/// A reqwest client that ignores proxy settings from the environment.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .pool_max_idle_per_host(0)
        .timeout(Duration::from_secs(5))
        .build()
        .unwrap()
}

/// An `RpcClient` pointed at `addr`.
pub fn rpc_client(addr: SocketAddr) -> RpcClient {
    RpcClient::with_client(http_client(), format!("http://{}", addr))
}
