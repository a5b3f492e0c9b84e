//! Request parameters.

/// A parameter value: a single string or several values under one name.
///
/// Values are always stored un-encoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    /// Scalar value.
    Single(String),
    /// Multi-valued parameter (`key=a&key=b`).
    Multi(Vec<String>),
}

impl ParamValue {
    /// All values in insertion order.
    pub fn values(&self) -> &[String] {
        match self {
            Self::Single(value) => std::slice::from_ref(value),
            Self::Multi(values) => values,
        }
    }

    /// The value, if this is a scalar.
    pub fn as_single(&self) -> Option<&str> {
        match self {
            Self::Single(value) => Some(value),
            Self::Multi(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        Self::Single(value.to_owned())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        Self::Single(value)
    }
}

impl From<Vec<String>> for ParamValue {
    fn from(values: Vec<String>) -> Self {
        Self::Multi(values)
    }
}

/// Ordered mapping from parameter name to value.
///
/// Inserting an existing name replaces its value but keeps its position.
/// Built fresh for every request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParameterSet {
    /// Create an empty parameter set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a parameter.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(key, _)| *key == name) {
            Some((_, slot)) => *slot = value,
            None => self.entries.push((name, value)),
        }
    }

    /// Look up a parameter by name.
    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Remove a parameter, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<ParamValue> {
        let index = self.entries.iter().position(|(key, _)| key == name)?;
        Some(self.entries.remove(index).1)
    }

    /// Whether a parameter with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Overlay `other` onto this set; names in `other` win.
    pub fn merge(&mut self, other: ParameterSet) {
        for (name, value) in other.entries {
            self.insert(name, value);
        }
    }

    /// Iterate parameters in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries
            .iter()
            .map(|(name, value)| (name.as_str(), value))
    }

    /// Number of distinct parameter names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the set has no parameters.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for ParameterSet
where
    K: Into<String>,
    V: Into<ParamValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (name, value) in iter {
            params.insert(name, value);
        }
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_replaces_in_place() {
        let mut params = ParameterSet::new();
        params.insert("a", "1");
        params.insert("b", "2");
        params.insert("a", "3");

        let names: Vec<_> = params.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(params.get("a"), Some(&ParamValue::from("3")));
    }

    #[test]
    fn test_merge_overrides() {
        let mut params: ParameterSet = [("page", "1"), ("sort", "asc")].into_iter().collect();
        let other: ParameterSet = [("page", "2"), ("limit", "10")].into_iter().collect();

        params.merge(other);

        assert_eq!(params.len(), 3);
        assert_eq!(params.get("page").and_then(ParamValue::as_single), Some("2"));
        assert!(params.contains("limit"));
    }

    #[test]
    fn test_remove() {
        let mut params: ParameterSet = [("a", "1"), ("b", "2")].into_iter().collect();
        assert_eq!(params.remove("a"), Some(ParamValue::from("1")));
        assert_eq!(params.remove("a"), None);
        assert_eq!(params.len(), 1);
    }

    #[test]
    fn test_values() {
        let single = ParamValue::from("x");
        let multi = ParamValue::from(vec!["b".to_owned(), "a".to_owned()]);
        assert_eq!(single.values(), ["x".to_owned()]);
        assert_eq!(multi.values(), ["b".to_owned(), "a".to_owned()]);
        assert_eq!(multi.as_single(), None);
    }
}
