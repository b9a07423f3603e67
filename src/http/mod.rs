//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, dispatch)
//!     → routing (binding lookup, path params)
//!     → request.rs (request ID, query + body decode, decode logging)
//!     → context (headers folded into the request context)
//!     → endpoint call
//!     → response.rs (JSON body or error envelope)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::{MakeRequestUuid, X_REQUEST_ID};
pub use server::HttpServer;
