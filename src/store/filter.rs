use std::fmt::Display;

/// Server-side query predicate in the `field.predicate=value` vocabulary of
/// the API (`roomId.equals=3`, `wifi.in=true`, `facilityId.specified=false`).
///
/// The console never interprets these; it only builds and forwards them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryFilter {
    params: Vec<(String, String)>,
}

impl QueryFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Display) -> Self {
        self.params.push((key.into(), value.to_string()));
        self
    }

    pub fn equals(self, field: &str, value: impl Display) -> Self {
        self.with(format!("{field}.equals"), value)
    }

    /// Multi-valued predicates repeat the key, one parameter per value.
    pub fn in_values<V, I>(mut self, field: &str, values: I) -> Self
    where
        V: Display,
        I: IntoIterator<Item = V>,
    {
        let key = format!("{field}.in");
        for value in values {
            self.params.push((key.clone(), value.to_string()));
        }
        self
    }

    pub fn specified(self, field: &str, specified: bool) -> Self {
        self.with(format!("{field}.specified"), specified)
    }

    pub fn greater_than(self, field: &str, value: impl Display) -> Self {
        self.with(format!("{field}.greaterThan"), value)
    }

    pub fn params(&self) -> &[(String, String)] {
        &self.params
    }

    pub fn get(&self, key: &str) -> Vec<&str> {
        self.params
            .iter()
            .filter(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
            .collect()
    }
}
