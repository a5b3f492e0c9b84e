//! Flat query-string codec.
//!
//! Unlike form decoding, [`parse`] keeps values exactly as written and has
//! no bracket/array semantics, and [`build`] encodes with RFC 3986 rules
//! (`%20` for space, brackets always escaped).

use crate::encoding::encode;
use crate::params::{ParamValue, ParameterSet};

/// Split a query string into parameters.
///
/// Each segment is split on its first `=`; a segment without `=` yields an
/// empty value. Empty segments are skipped. A repeated key overwrites the
/// earlier value.
///
/// Values are not decoded, so `parse(&build(&params))` only reproduces
/// `params` when every key and value is made of unreserved characters.
pub fn parse(query: &str) -> ParameterSet {
    let mut params = ParameterSet::new();
    for segment in query.split('&').filter(|s| !s.is_empty()) {
        let (key, value) = segment.split_once('=').unwrap_or((segment, ""));
        params.insert(key, value);
    }
    params
}

/// Serialize parameters into a query string, in their given order.
///
/// Multi-valued parameters are emitted as repeated `key=value` pairs.
pub fn build(params: &ParameterSet) -> String {
    let mut pairs = Vec::with_capacity(params.len());
    for (key, value) in params.iter() {
        let key = encode(key);
        match value {
            ParamValue::Single(v) => pairs.push(format!("{key}={}", encode(v))),
            ParamValue::Multi(values) => {
                pairs.extend(values.iter().map(|v| format!("{key}={}", encode(v))));
            }
        }
    }
    pairs.join("&")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_empty() {
        assert!(parse("").is_empty());
    }

    #[test]
    fn test_parse_splits_on_first_equals() {
        let params = parse("token=abc==&x=1");
        assert_eq!(params.get("token"), Some(&ParamValue::from("abc==")));
        assert_eq!(params.get("x"), Some(&ParamValue::from("1")));
    }

    #[test]
    fn test_parse_keeps_values_encoded() {
        let params = parse("q=a%20b");
        assert_eq!(params.get("q"), Some(&ParamValue::from("a%20b")));
    }

    #[test]
    fn test_parse_no_array_semantics() {
        let params = parse("ids[]=1&ids[]=2");
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("ids[]"), Some(&ParamValue::from("2")));
    }

    #[test]
    fn test_parse_last_write_wins() {
        let params = parse("a=1&b=2&a=3");
        let pairs: Vec<_> = params
            .iter()
            .map(|(k, v)| (k, v.as_single().unwrap_or_default()))
            .collect();
        assert_eq!(pairs, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_parse_key_without_value() {
        let params = parse("flag&x=1");
        assert_eq!(params.get("flag"), Some(&ParamValue::from("")));
    }

    #[test]
    fn test_build_strict_encoding() {
        let params: ParameterSet = [("name", "John Doe"), ("tags[0]", "a+b"), ("path", "~/x")]
            .into_iter()
            .collect();
        assert_eq!(
            build(&params),
            "name=John%20Doe&tags%5B0%5D=a%2Bb&path=~%2Fx"
        );
    }

    #[test]
    fn test_build_multi_value() {
        let mut params = ParameterSet::new();
        params.insert("id", vec!["2".to_owned(), "1".to_owned()]);
        assert_eq!(build(&params), "id=2&id=1");
    }

    #[test]
    fn test_parse_build_round_trip() {
        let params: ParameterSet = [("page", "2"), ("sort", "title"), ("acting_account", "42")]
            .into_iter()
            .collect();
        assert_eq!(parse(&build(&params)), params);
    }

    #[test]
    fn test_parse_build_keeps_escapes() {
        let params: ParameterSet = [("title", "My Video")].into_iter().collect();
        let reparsed = parse(&build(&params));
        assert_eq!(reparsed.get("title"), Some(&ParamValue::from("My%20Video")));
    }
}
