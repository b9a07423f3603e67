//! Path parameter extraction.
//!
//! # Responsibilities
//! - Compare segment counts of a concrete path and its template
//! - Pull the value at each placeholder index out of the path
//!
//! # Design Decisions
//! - Counts are compared on trimmed strings (trailing slashes removed) while
//!   values are read from the untrimmed split of the path. A trailing slash
//!   on either side is therefore tolerated and never shifts an index.
//! - No partial matching: a count mismatch fails the whole extraction
//! - Literal segments are not compared here; that is the router's job
//! - Values come back exactly as they appear in the path. Percent-decoding
//!   is a separate step (`decode_path_params`) run once a binding matched

use std::collections::HashMap;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::routing::template::{build_param_map, trimmed_segment_count};

/// Placeholder name → value taken from the request path.
pub type PathParams = HashMap<String, String>;

/// Errors raised while matching a path against a template.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MatchError {
    #[error("Expected a path containing {expected} parts, provided path contains {actual} parts")]
    SegmentCountMismatch { expected: usize, actual: usize },

    #[error("path has no segment at index {index} for placeholder `{name}`")]
    MissingSegment { name: String, index: usize },

    #[error("path parameter `{name}` is not valid percent-encoded UTF-8: `{value}`")]
    InvalidEncoding { name: String, value: String },
}

/// Extracts the named placeholder values of `template` from `path`.
///
/// ```
/// use rpc_bridge::routing::path_params;
///
/// let params = path_params("/v1/42/foo", "/v1/{a}/{b}").unwrap();
/// assert_eq!(params["a"], "42");
/// assert_eq!(params["b"], "foo");
/// ```
pub fn path_params(path: &str, template: &str) -> Result<PathParams, MatchError> {
    let param_map = build_param_map(template);

    let expected = trimmed_segment_count(template);
    let actual = trimmed_segment_count(path);
    if expected != actual {
        return Err(MatchError::SegmentCountMismatch { expected, actual });
    }

    let parts: Vec<&str> = path.split('/').collect();
    param_map
        .into_iter()
        .map(|(name, index)| match parts.get(index) {
            Some(value) => Ok((name, (*value).to_string())),
            None => Err(MatchError::MissingSegment { name, index }),
        })
        .collect()
}

/// Percent-decodes every extracted value.
pub fn decode_path_params(params: PathParams) -> Result<PathParams, MatchError> {
    params
        .into_iter()
        .map(|(name, value)| match percent_decode_str(&value).decode_utf8() {
            Ok(decoded) => Ok((name, decoded.into_owned())),
            Err(_) => Err(MatchError::InvalidEncoding { name, value }),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_params() {
        let params = path_params("/v1/42/foo", "/v1/{a}/{b}").unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params["a"], "42");
        assert_eq!(params["b"], "foo");
    }

    #[test]
    fn test_segment_count_mismatch() {
        let err = path_params("/v1/42", "/v1/{a}/{b}").unwrap_err();
        assert_eq!(
            err,
            MatchError::SegmentCountMismatch {
                expected: 4,
                actual: 3
            }
        );

        let message = err.to_string();
        assert!(message.contains('4'));
        assert!(message.contains('3'));
    }

    #[test]
    fn test_segment_count_message() {
        let err = MatchError::SegmentCountMismatch {
            expected: 4,
            actual: 3,
        };
        assert_eq!(
            err.to_string(),
            "Expected a path containing 4 parts, provided path contains 3 parts"
        );
    }

    #[test]
    fn test_extraction_keeps_escapes() {
        let params = path_params("/v1/sci%20fi/a%2Fb", "/v1/{a}/{b}").unwrap();
        assert_eq!(params["a"], "sci%20fi");
        assert_eq!(params["b"], "a%2Fb");
    }

    #[test]
    fn test_decode_path_params() {
        let params = path_params("/v1/sci%20fi/a%2Fb", "/v1/{a}/{b}").unwrap();
        let decoded = decode_path_params(params).unwrap();
        assert_eq!(decoded["a"], "sci fi");
        assert_eq!(decoded["b"], "a/b");

        let plain = PathParams::from([("id".to_string(), "42".to_string())]);
        assert_eq!(decode_path_params(plain.clone()).unwrap(), plain);
    }

    #[test]
    fn test_decode_path_params_rejects_invalid_utf8() {
        let params = PathParams::from([("id".to_string(), "%FF%FE".to_string())]);
        assert_eq!(
            decode_path_params(params).unwrap_err(),
            MatchError::InvalidEncoding {
                name: "id".to_string(),
                value: "%FF%FE".to_string(),
            }
        );
    }

    #[test]
    fn test_trailing_slash_tolerated() {
        let params = path_params("/v1/42/foo/", "/v1/{a}/{b}").unwrap();
        assert_eq!(params["a"], "42");
        assert_eq!(params["b"], "foo");

        let params = path_params("/v1/42/foo", "/v1/{a}/{b}/").unwrap();
        assert_eq!(params["b"], "foo");
    }

    #[test]
    fn test_literals_are_not_compared() {
        let params = path_params("/v2/42/foo", "/v1/{a}/{b}").unwrap();
        assert_eq!(params["a"], "42");
    }

    #[test]
    fn test_no_placeholders() {
        assert!(path_params("/health", "/health").unwrap().is_empty());
    }

    #[test]
    fn test_extraction_agrees_with_param_map() {
        let cases = [
            ("/v1/{a}/{b}", "/v1/x/y"),
            ("/users/{id}/posts/{post}", "/users/7/posts/hello-world"),
            ("{first}/static/{last}", "one/static/two"),
            ("/a/{b}/c/{d}/e", "/a/1/c/2/e/"),
        ];

        for (template, path) in cases {
            let params = path_params(path, template).unwrap();
            let parts: Vec<&str> = path.split('/').collect();
            for (name, index) in build_param_map(template) {
                assert_eq!(params[&name], parts[index], "{template} vs {path}");
            }
        }
    }
}
