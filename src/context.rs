//! Request-scoped context.
//!
//! A `RequestContext` is an immutable stack of key/value layers. Adding
//! values returns a new context that shares every existing layer with the
//! original, so the caller's context is never touched.
//!
//! Header enrichment stores each header twice: under its canonical HTTP
//! form (`X-Request-Id`) and in lower case (`x-request-id`), so handlers
//! can look keys up in either style. When a header repeats, its first
//! value is the one stored.

use std::collections::HashMap;
use std::sync::Arc;

use axum::http::HeaderMap;

#[derive(Debug)]
struct Layer {
    values: HashMap<String, String>,
    parent: Option<Arc<Layer>>,
}

/// Immutable key/value overlay carried alongside a call.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    head: Option<Arc<Layer>>,
}

impl RequestContext {
    /// An empty root context.
    pub fn background() -> Self {
        Self::default()
    }

    /// Returns a new context with `key` set to `value`.
    pub fn with_value(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_values([(key.into(), value.into())])
    }

    /// Returns a new context with all `values` added as one layer.
    ///
    /// Within the layer, the first occurrence of a key is kept.
    pub fn with_values<I, K, V>(&self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut layer = HashMap::new();
        for (k, v) in values {
            layer.entry(k.into()).or_insert_with(|| v.into());
        }

        if layer.is_empty() {
            return self.clone();
        }

        Self {
            head: Some(Arc::new(Layer {
                values: layer,
                parent: self.head.clone(),
            })),
        }
    }

    /// Look up `key`, newest layer first.
    pub fn get(&self, key: &str) -> Option<&str> {
        let mut layer = self.head.as_deref();
        while let Some(current) = layer {
            if let Some(value) = current.values.get(key) {
                return Some(value.as_str());
            }
            layer = current.parent.as_deref();
        }
        None
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
}

/// Derive a context holding every header under both key spellings.
///
/// Values that are not valid UTF-8 are skipped.
pub fn enrich_context(ctx: &RequestContext, headers: &HeaderMap) -> RequestContext {
    let mut entries = Vec::with_capacity(headers.keys_len() * 2);
    for name in headers.keys() {
        // `get` yields the first value of a repeated header.
        let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) else {
            tracing::trace!(header = %name, "Skipping non UTF-8 header value");
            continue;
        };
        let lower = name.as_str().to_ascii_lowercase();
        entries.push((canonical_header_key(&lower), value.to_string()));
        entries.push((lower, value.to_string()));
    }
    ctx.with_values(entries)
}

/// Canonical MIME header form: first letter and every letter following a
/// hyphen upper-cased, the rest lower-cased.
pub fn canonical_header_key(name: &str) -> String {
    let mut upper = true;
    name.chars()
        .map(|c| {
            let out = if upper {
                c.to_ascii_uppercase()
            } else {
                c.to_ascii_lowercase()
            };
            upper = c == '-';
            out
        })
        .collect()
}
