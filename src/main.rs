//! RPC-over-HTTP bridge (v1)
//!
//! Serves a small demo service through the transport adapter.
//!
//! # Architecture Overview
//!
//! ```text
//!                        ┌──────────────────────────────────────────────────┐
//!                        │                    RPC BRIDGE                     │
//!                        │                                                   │
//!     HTTP Request       │  ┌─────────┐   ┌───────────┐   ┌──────────────┐   │
//!     ───────────────────┼─▶│  http   │──▶│  routing  │──▶│   request    │   │
//!                        │  │ server  │   │ template/ │   │ query + body │   │
//!                        │  └─────────┘   │  matcher  │   └──────┬───────┘   │
//!                        │                └───────────┘          │           │
//!                        │                                       ▼           │
//!                        │                ┌───────────┐   ┌──────────────┐   │
//!                        │                │  context  │──▶│   endpoint   │   │
//!                        │                │ (headers) │   │    call      │   │
//!                        │                └───────────┘   └──────┬───────┘   │
//!                        │                                       ▼           │
//!     HTTP Response      │                               ┌──────────────┐   │
//!     ◀──────────────────┼───────────────────────────────│    codec     │   │
//!                        │                               │ JSON / error │   │
//!                        │                               └──────────────┘   │
//!                        └──────────────────────────────────────────────────┘
//! ```
//!
//! # Demo Bindings
//! - `GET /v1/echo/{message}` echoes the message and the caller's user agent
//! - `GET /v1/sum/{a}/{b}` adds two integers
//! - `POST /v1/fail` always fails with the `reason` field of its body

use std::path::PathBuf;

use axum::http::Method;
use clap::Parser;
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

use rpc_bridge::config::validation::validate_config;
use rpc_bridge::config::{load_config, ConfigError, GatewayConfig};
use rpc_bridge::lifecycle::signals::wait_for_signal;
use rpc_bridge::observability::{logging, metrics};
use rpc_bridge::routing::TemplateError;
use rpc_bridge::{CallRequest, HttpServer, RequestContext, Router, Shutdown, TransportError};

#[derive(Parser)]
#[command(name = "rpc-bridge")]
#[command(about = "Serve RPC endpoints over URL-templated HTTP", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[derive(Serialize)]
struct EchoReply {
    message: String,
    user_agent: Option<String>,
}

#[derive(Serialize)]
struct SumReply {
    sum: i64,
}

#[derive(Deserialize)]
struct FailRequest {
    reason: String,
}

async fn echo(ctx: RequestContext, call: CallRequest) -> Result<EchoReply, TransportError> {
    Ok(EchoReply {
        message: call.param("message")?,
        user_agent: ctx.get("User-Agent").map(str::to_string),
    })
}

async fn sum(_ctx: RequestContext, call: CallRequest) -> Result<SumReply, TransportError> {
    let a: i64 = call.param("a")?;
    let b: i64 = call.param("b")?;
    Ok(SumReply { sum: a + b })
}

async fn fail(_ctx: RequestContext, call: CallRequest) -> Result<(), TransportError> {
    let request: FailRequest = call.body_as()?;
    Err(TransportError::Handler(request.reason.into()))
}

fn demo_bindings() -> Result<Router, TemplateError> {
    Router::new()
        .route(Method::GET, "/v1/echo/{message}", "echo", echo)?
        .route(Method::GET, "/v1/sum/{a}/{b}", "sum", sum)?
        .route(Method::POST, "/v1/fail", "fail", fail)
}

/// The config file (or defaults) with command line overrides applied,
/// validated as a whole.
fn resolve_config(cli: &Cli) -> Result<GatewayConfig, ConfigError> {
    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => GatewayConfig::default(),
    };
    if let Some(bind) = &cli.bind {
        config.listener.bind_address = bind.clone();
    }

    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    logging::init(&config.observability.log_level);
    tracing::info!("rpc-bridge v{} starting", env!("CARGO_PKG_VERSION"));

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.security.max_body_size,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let bindings = demo_bindings()?;
    let server = HttpServer::new(config, bindings);

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        wait_for_signal().await;
        shutdown.trigger();
    });

    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
