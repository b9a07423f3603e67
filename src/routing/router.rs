//! Binding lookup.
//!
//! # Responsibilities
//! - Store registered bindings (method + template + endpoint)
//! - Find the binding for a request and extract its path parameters
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - Templates validated at registration, never at request time
//! - O(n) scan in registration order; first match wins

use std::sync::Arc;

use axum::http::Method;

use crate::routing::matcher::{path_params, PathParams};
use crate::routing::template::{PathTemplate, TemplateError};
use crate::service::Endpoint;

/// A method + template pair bound to an endpoint.
pub struct Binding {
    /// Name used in logs and metrics.
    pub name: String,
    pub method: Method,
    pub template: PathTemplate,
    pub endpoint: Arc<dyn Endpoint>,
}

impl std::fmt::Debug for Binding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Binding")
            .field("name", &self.name)
            .field("method", &self.method)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

/// Ordered set of bindings.
#[derive(Debug, Default)]
pub struct Router {
    bindings: Vec<Arc<Binding>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `endpoint` under `method` and `template`.
    pub fn route(
        mut self,
        method: Method,
        template: &str,
        name: impl Into<String>,
        endpoint: impl Endpoint,
    ) -> Result<Self, TemplateError> {
        let template = PathTemplate::parse(template)?;
        let name = name.into();

        tracing::debug!(
            binding = %name,
            method = %method,
            template = %template,
            "Binding registered"
        );

        self.bindings.push(Arc::new(Binding {
            name,
            method,
            template,
            endpoint: Arc::new(endpoint),
        }));
        Ok(self)
    }

    /// Find the binding for `method` and `path`.
    pub fn resolve(&self, method: &Method, path: &str) -> Option<(Arc<Binding>, PathParams)> {
        self.bindings
            .iter()
            .filter(|b| b.method == *method && b.template.matches_literals(path))
            .find_map(|b| match path_params(path, b.template.as_str()) {
                Ok(params) => Some((b.clone(), params)),
                Err(e) => {
                    tracing::warn!(binding = %b.name, path = %path, error = %e, "Path extraction failed");
                    None
                }
            })
    }

    pub fn bindings(&self) -> impl Iterator<Item = &Binding> {
        self.bindings.iter().map(|b| b.as_ref())
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
