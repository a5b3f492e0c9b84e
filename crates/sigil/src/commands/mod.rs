//! CLI command implementations.

pub(crate) mod request;
pub(crate) mod sign;

pub(crate) use request::RequestArgs;
pub(crate) use sign::SignArgs;

/// Parse a `name=value` argument.
pub(crate) fn parse_pair(arg: &str) -> Result<(String, String), String> {
    arg.split_once('=')
        .map(|(name, value)| (name.to_owned(), value.to_owned()))
        .ok_or_else(|| format!("expected name=value, got `{arg}`"))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_pair() {
        assert_eq!(
            parse_pair("page=2").unwrap(),
            ("page".to_owned(), "2".to_owned())
        );
        assert_eq!(
            parse_pair("token=a=b").unwrap(),
            ("token".to_owned(), "a=b".to_owned())
        );
        assert_eq!(parse_pair("empty=").unwrap(), ("empty".to_owned(), String::new()));
    }

    #[test]
    fn test_parse_pair_rejects_missing_equals() {
        assert!(parse_pair("page").unwrap_err().contains("name=value"));
    }
}
