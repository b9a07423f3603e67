//! URL template indexing.
//!
//! # Responsibilities
//! - Locate each `{name}` placeholder within a slash-separated template
//! - Validate templates at registration time
//! - Render templates back into concrete paths (client side)
//!
//! # Design Decisions
//! - Indices count the raw split, so `/v1/{a}` puts `a` at 2 (segment 0 is
//!   the empty string before the leading slash)
//! - `build_param_map` is permissive: braces are stripped without checking
//!   that they balance
//! - `PathTemplate::parse` is the strict form and rejects malformed segments

use std::collections::HashMap;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use thiserror::Error;

/// Placeholder name → segment index.
pub type ParamMap = HashMap<String, usize>;

/// Everything but RFC 3986 unreserved characters, `/` included.
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Errors produced when a template fails strict parsing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    /// A segment holds braces but is not exactly `{name}`.
    #[error("malformed placeholder segment `{segment}` in template `{template}`")]
    MalformedSegment { template: String, segment: String },

    /// `{}` with nothing inside.
    #[error("empty placeholder name in template `{0}`")]
    EmptyName(String),

    /// The same name bound twice.
    #[error("placeholder `{name}` appears more than once in template `{template}`")]
    DuplicateName { template: String, name: String },

    /// Rendering was asked for a placeholder that has no value.
    #[error("no value provided for placeholder `{0}`")]
    MissingValue(String),
}

/// Builds the param map for a URL template.
///
/// Given `"/v1/{a}/{b}"` the result maps `a` to 2 and `b` to 3.
pub fn build_param_map(template: &str) -> ParamMap {
    template
        .split('/')
        .enumerate()
        .filter(|(_, segment)| is_placeholder(segment))
        .map(|(idx, segment)| (remove_braces(segment), idx))
        .collect()
}

/// Removes every opening and closing brace from `segment`.
pub fn remove_braces(segment: &str) -> String {
    segment.replace(['{', '}'], "")
}

fn is_placeholder(segment: &str) -> bool {
    segment.contains(['{', '}'])
}

/// Number of segments once trailing slashes are trimmed.
pub(crate) fn trimmed_segment_count(value: &str) -> usize {
    value.trim_end_matches('/').split('/').count()
}

/// A validated URL template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    raw: String,
    params: ParamMap,
    segment_count: usize,
}

impl PathTemplate {
    /// Parse and validate a template.
    pub fn parse(template: impl Into<String>) -> Result<Self, TemplateError> {
        let raw = template.into();

        let mut params = ParamMap::new();
        for (idx, segment) in raw.split('/').enumerate() {
            if !is_placeholder(segment) {
                continue;
            }

            let name = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .filter(|name| !is_placeholder(name))
                .ok_or_else(|| TemplateError::MalformedSegment {
                    template: raw.clone(),
                    segment: segment.to_string(),
                })?;

            if name.is_empty() {
                return Err(TemplateError::EmptyName(raw.clone()));
            }

            if params.insert(name.to_string(), idx).is_some() {
                return Err(TemplateError::DuplicateName {
                    template: raw.clone(),
                    name: name.to_string(),
                });
            }
        }

        let segment_count = trimmed_segment_count(&raw);
        Ok(Self {
            raw,
            params,
            segment_count,
        })
    }

    /// The template as registered.
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Placeholder positions.
    pub fn params(&self) -> &ParamMap {
        &self.params
    }

    /// Segment count with trailing slashes trimmed.
    pub fn segment_count(&self) -> usize {
        self.segment_count
    }

    /// Returns true if `path` has the same segment count and agrees on every
    /// literal segment.
    pub fn matches_literals(&self, path: &str) -> bool {
        if trimmed_segment_count(path) != self.segment_count {
            return false;
        }

        self.raw
            .trim_end_matches('/')
            .split('/')
            .zip(path.trim_end_matches('/').split('/'))
            .all(|(expected, actual)| is_placeholder(expected) || expected == actual)
    }

    /// Fill every placeholder from `values`, percent-encoding each value so
    /// it stays a single path segment.
    pub fn render(&self, values: &HashMap<String, String>) -> Result<String, TemplateError> {
        let segments = self
            .raw
            .split('/')
            .map(|segment| {
                if !is_placeholder(segment) {
                    return Ok(segment.to_string());
                }
                let name = remove_braces(segment);
                values
                    .get(&name)
                    .map(|value| utf8_percent_encode(value, SEGMENT).to_string())
                    .ok_or(TemplateError::MissingValue(name))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(segments.join("/"))
    }
}

impl std::fmt::Display for PathTemplate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_param_map() {
        let map = build_param_map("/v1/{a}/{b}");
        assert_eq!(map.len(), 2);
        assert_eq!(map["a"], 2);
        assert_eq!(map["b"], 3);
    }

    #[test]
    fn test_build_param_map_without_leading_slash() {
        let map = build_param_map("v1/{a}");
        assert_eq!(map["a"], 1);
    }

    #[test]
    fn test_build_param_map_is_idempotent() {
        let template = "/users/{user_id}/posts/{post_id}/";
        assert_eq!(build_param_map(template), build_param_map(template));
    }

    #[test]
    fn test_build_param_map_is_permissive() {
        let map = build_param_map("/v1/{open/close}/x{y}z");
        assert_eq!(map["open"], 2);
        assert_eq!(map["close"], 3);
        assert_eq!(map["xyz"], 4);
        assert!(build_param_map("/v1/plain").is_empty());
    }

    #[test]
    fn test_remove_braces() {
        assert_eq!(remove_braces("{name}"), "name");
        assert_eq!(remove_braces("}{a{"), "a");
        assert_eq!(remove_braces("plain"), "plain");
    }

    #[test]
    fn test_parse_valid_template() {
        let template = PathTemplate::parse("/v1/{a}/{b}/").unwrap();
        assert_eq!(template.segment_count(), 4);
        assert_eq!(template.params(), &build_param_map("/v1/{a}/{b}/"));
        assert_eq!(template.to_string(), "/v1/{a}/{b}/");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            PathTemplate::parse("/v1/{a"),
            Err(TemplateError::MalformedSegment { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/v1/x{a}"),
            Err(TemplateError::MalformedSegment { .. })
        ));
        assert!(matches!(
            PathTemplate::parse("/v1/{{a}}"),
            Err(TemplateError::MalformedSegment { .. })
        ));
        assert_eq!(
            PathTemplate::parse("/v1/{}"),
            Err(TemplateError::EmptyName("/v1/{}".to_string()))
        );
        assert!(matches!(
            PathTemplate::parse("/v1/{a}/{a}"),
            Err(TemplateError::DuplicateName { .. })
        ));
    }

    #[test]
    fn test_matches_literals() {
        let template = PathTemplate::parse("/v1/users/{id}").unwrap();
        assert!(template.matches_literals("/v1/users/7"));
        assert!(template.matches_literals("/v1/users/7/"));
        assert!(!template.matches_literals("/v1/groups/7"));
        assert!(!template.matches_literals("/v1/users/7/posts"));
        assert!(!template.matches_literals("/v1/users"));
    }

    #[test]
    fn test_render() {
        let template = PathTemplate::parse("/v1/{a}/{b}").unwrap();
        let values = HashMap::from([
            ("a".to_string(), "42".to_string()),
            ("b".to_string(), "foo".to_string()),
        ]);
        assert_eq!(template.render(&values).unwrap(), "/v1/42/foo");

        let escaped = HashMap::from([
            ("a".to_string(), "sci fi".to_string()),
            ("b".to_string(), "a/b?c".to_string()),
        ]);
        assert_eq!(template.render(&escaped).unwrap(), "/v1/sci%20fi/a%2Fb%3Fc");

        let partial = HashMap::from([("a".to_string(), "42".to_string())]);
        assert_eq!(
            template.render(&partial),
            Err(TemplateError::MissingValue("b".to_string()))
        );
    }
}
