//! Signature base string construction.
//!
//! Format: `METHOD&encoded_base_url&encoded_normalized_parameters`

use tracing::trace;

use crate::encoding::encode;
use crate::params::{ParamValue, ParameterSet};
use crate::signature::SignatureMethodKind;

/// Everything needed to compute one request's base string.
///
/// Built per request and consumed by a single signing pass.
#[derive(Debug, Clone)]
pub struct SigningContext {
    /// HTTP method; uppercased during normalization.
    pub method: String,
    /// Scheme, host and path. No query string or fragment.
    pub base_url: String,
    /// Request parameters merged with the OAuth protocol parameters,
    /// excluding `oauth_signature`.
    pub parameters: ParameterSet,
    /// Method that will sign the base string.
    pub signature_method: SignatureMethodKind,
}

impl SigningContext {
    /// Build the signature base string for this context.
    pub fn base_string(&self) -> String {
        signature_base_string(&self.method, &self.base_url, &self.parameters)
    }
}

/// Normalize parameters for the base string.
///
/// Keys are sorted by byte order. A multi-valued key emits one pair per
/// value, values sorted the same way. Keys and values are percent-encoded
/// and pairs joined with `&`.
pub fn normalize_parameters(params: &ParameterSet) -> String {
    let mut entries: Vec<(&str, &ParamValue)> = params.iter().collect();
    entries.sort_by(|(a, _), (b, _)| a.as_bytes().cmp(b.as_bytes()));

    let mut pairs = Vec::with_capacity(entries.len());
    for (key, value) in entries {
        let key = encode(key);
        match value {
            ParamValue::Single(v) => pairs.push(format!("{key}={}", encode(v))),
            ParamValue::Multi(values) => {
                let mut sorted: Vec<&str> = values.iter().map(String::as_str).collect();
                sorted.sort_unstable();
                pairs.extend(sorted.into_iter().map(|v| format!("{key}={}", encode(v))));
            }
        }
    }
    pairs.join("&")
}

/// Build the signature base string.
pub fn signature_base_string(method: &str, base_url: &str, params: &ParameterSet) -> String {
    let normalized = normalize_parameters(params);
    let base_string = format!(
        "{}&{}&{}",
        encode(&method.to_uppercase()),
        encode(base_url),
        encode(&normalized)
    );
    trace!(base_string = %base_string, "Built signature base string");
    base_string
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn example_params() -> ParameterSet {
        [
            ("oauth_consumer_key", "key"),
            ("oauth_nonce", "abc"),
            ("oauth_signature_method", "HMAC-SHA1"),
            ("oauth_timestamp", "1000"),
            ("oauth_token", "tok"),
            ("oauth_version", "1.0"),
            ("foo", "bar"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_normalize_sorts_by_key() {
        let normalized = normalize_parameters(&example_params());
        assert_eq!(
            normalized,
            "foo=bar&oauth_consumer_key=key&oauth_nonce=abc&oauth_signature_method=HMAC-SHA1&oauth_timestamp=1000&oauth_token=tok&oauth_version=1.0"
        );
    }

    #[test]
    fn test_base_string_example() {
        let base = signature_base_string("get", "http://example.com/resource", &example_params());
        assert!(base.starts_with(
            "GET&http%3A%2F%2Fexample.com%2Fresource&foo%3Dbar%26oauth_consumer_key%3Dkey%26oauth_nonce%3Dabc"
        ));
    }

    #[test]
    fn test_base_string_independent_of_insertion_order() {
        let forward = example_params();
        let entries: Vec<(String, ParamValue)> = forward
            .iter()
            .map(|(k, v)| (k.to_owned(), v.clone()))
            .collect();
        let reversed: ParameterSet = entries.into_iter().rev().collect();

        let url = "https://api.example.com/videos";
        assert_eq!(
            signature_base_string("POST", url, &forward),
            signature_base_string("POST", url, &reversed)
        );
    }

    #[test]
    fn test_byte_order_not_locale_order() {
        let params: ParameterSet = [("b", "1"), ("B", "2"), ("a", "3"), ("_", "4")]
            .into_iter()
            .collect();
        assert_eq!(normalize_parameters(&params), "B=2&_=4&a=3&b=1");
    }

    #[test]
    fn test_multi_value_sorted_at_key_position() {
        let mut params = ParameterSet::new();
        params.insert("z", "last");
        params.insert("id", vec!["3".to_owned(), "1".to_owned(), "2".to_owned()]);
        params.insert("a", "first");
        assert_eq!(
            normalize_parameters(&params),
            "a=first&id=1&id=2&id=3&z=last"
        );
    }

    #[test]
    fn test_values_encoded_in_normalized_string() {
        let params: ParameterSet = [("q", "a b&c"), ("c@", "")].into_iter().collect();
        assert_eq!(normalize_parameters(&params), "c%40=&q=a%20b%26c");
    }

    #[test]
    fn test_reference_base_string() {
        // OAuth Core 1.0, Appendix A.5.1.
        let context = SigningContext {
            method: "GET".to_owned(),
            base_url: "http://photos.example.net/photos".to_owned(),
            parameters: [
                ("file", "vacation.jpg"),
                ("size", "original"),
                ("oauth_consumer_key", "dpf43f3p2l4k3l03"),
                ("oauth_token", "nnch734d00sl2jdk"),
                ("oauth_signature_method", "HMAC-SHA1"),
                ("oauth_timestamp", "1191242096"),
                ("oauth_nonce", "kllo9940pd9333jh"),
                ("oauth_version", "1.0"),
            ]
            .into_iter()
            .collect(),
            signature_method: SignatureMethodKind::HmacSha1,
        };
        assert_eq!(
            context.base_string(),
            "GET&http%3A%2F%2Fphotos.example.net%2Fphotos&file%3Dvacation.jpg%26oauth_consumer_key%3Ddpf43f3p2l4k3l03%26oauth_nonce%3Dkllo9940pd9333jh%26oauth_signature_method%3DHMAC-SHA1%26oauth_timestamp%3D1191242096%26oauth_token%3Dnnch734d00sl2jdk%26oauth_version%3D1.0%26size%3Doriginal"
        );
    }
}
