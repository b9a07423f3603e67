//! Query string flattening.
//!
//! # Design Decisions
//! - First value wins for repeated keys
//! - A key with no values at all is left out of the result

use std::collections::HashMap;

/// Multi-valued query parameters, values kept in arrival order.
pub type QueryValues = HashMap<String, Vec<String>>;

/// Single-valued query parameters.
pub type QueryParams = HashMap<String, String>;

/// Decode a raw query string (without the leading `?`).
pub fn parse_query(raw: &str) -> QueryValues {
    let mut values = QueryValues::new();
    for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
        values
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }
    values
}

/// Keep the first value of every key.
pub fn query_params(values: &QueryValues) -> QueryParams {
    values
        .iter()
        .filter_map(|(key, vals)| vals.first().map(|first| (key.clone(), first.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_value_wins() {
        let values = QueryValues::from([
            ("x".to_string(), vec!["1".to_string(), "2".to_string()]),
            ("y".to_string(), vec!["only".to_string()]),
        ]);
        let params = query_params(&values);
        assert_eq!(params.len(), 2);
        assert_eq!(params["x"], "1");
        assert_eq!(params["y"], "only");
    }

    #[test]
    fn test_empty_sequence_is_omitted() {
        let values = QueryValues::from([("x".to_string(), Vec::new())]);
        assert!(query_params(&values).is_empty());
    }

    #[test]
    fn test_parse_query() {
        let values = parse_query("x=1&y=hello%20world&x=2&flag");
        assert_eq!(values["x"], vec!["1", "2"]);
        assert_eq!(values["y"], vec!["hello world"]);
        assert_eq!(values["flag"], vec![""]);

        let params = query_params(&values);
        assert_eq!(params["x"], "1");
    }

    #[test]
    fn test_parse_empty_query() {
        assert!(parse_query("").is_empty());
    }
}
