//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Incoming Request (method, path, query)
//!     → router.rs (binding lookup by method + literal segments)
//!     → template.rs (param map: placeholder → segment index)
//!     → matcher.rs (segment count check, value extraction,
//!                   percent-decoding of the extracted values)
//!     → query.rs (first value per query key)
//!     → Return: binding + path params, or no match
//!
//! Binding Registration (at startup):
//!     (method, template, endpoint)
//!     → PathTemplate::parse (strict validation)
//!     → Freeze as immutable Router
//! ```
//!
//! # Design Decisions
//! - Bindings registered at startup, immutable at runtime
//! - No regex; templates are plain `{name}` segments
//! - Deterministic: same input always resolves to the same binding

pub mod matcher;
pub mod query;
pub mod router;
pub mod template;

pub use matcher::{decode_path_params, path_params, MatchError, PathParams};
pub use query::{parse_query, query_params, QueryParams, QueryValues};
pub use router::{Binding, Router};
pub use template::{build_param_map, remove_braces, ParamMap, PathTemplate, TemplateError};
