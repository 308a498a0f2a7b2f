//! Keyed view of a parse result.
//!
//! Callers that look parameters up by name (file transformation rules,
//! test run overrides) want a map rather than a sequence. Keys keep the
//! order they were first seen in; a repeated name overwrites the value.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::error::{ParseError, Result};
use crate::pair::NameValuePair;
use crate::tokenizer::{strip_outer_quotes, tokenize, ParseOptions};

/// Insertion-ordered parameter map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParameterMap {
    entries: Vec<NameValuePair>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `name` to `value`, keeping the position of an existing entry.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        match self.entries.iter_mut().find(|e| e.name == name) {
            Some(entry) => entry.value = value,
            None => self.entries.push(NameValuePair { name, value }),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|e| e.name == name)
            .map(|e| e.value.as_str())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Look up a parameter that must be present.
    pub fn require(&self, name: &str) -> Result<&str> {
        self.get(name)
            .ok_or_else(|| ParseError::MissingParameter(name.to_string(), String::new()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate `(name, value)` in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries
            .iter()
            .map(|e| (e.name.as_str(), e.value.as_str()))
    }

    /// The entries as pairs, in first-seen order.
    pub fn pairs(&self) -> &[NameValuePair] {
        &self.entries
    }
}

impl From<Vec<NameValuePair>> for ParameterMap {
    fn from(pairs: Vec<NameValuePair>) -> Self {
        let mut map = ParameterMap::new();
        for pair in pairs {
            map.insert(pair.name, pair.value);
        }
        map
    }
}

impl Serialize for ParameterMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entry in &self.entries {
            map.serialize_entry(&entry.name, &entry.value)?;
        }
        map.end()
    }
}

/// Parse into a keyed map. Values always lose one outer pair of double
/// quotes; the escape character is the default.
pub fn parse_map(input: &str) -> ParameterMap {
    let mut map: ParameterMap = tokenize(input, &ParseOptions::default()).into();
    for entry in &mut map.entries {
        if let Some(inner) = strip_outer_quotes(&entry.value) {
            entry.value = inner.to_string();
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_rule() {
        let map = parse_map("-transform Web.Release.config -xml Web.config");
        assert_eq!(map.len(), 2);
        assert_eq!(map.require("transform").unwrap(), "Web.Release.config");
        assert_eq!(map.get("xml"), Some("Web.config"));
        assert_eq!(
            map.require("result").unwrap_err(),
            ParseError::MissingParameter("result".to_string(), String::new())
        );
    }

    #[test]
    fn test_last_write_wins_in_place() {
        let map = parse_map("-a 1 -b 2 -a 3");
        let entries: Vec<_> = map.iter().collect();
        assert_eq!(entries, vec![("a", "3"), ("b", "2")]);
    }

    #[test]
    fn test_quotes_always_stripped() {
        let map = parse_map("-appType node -Handler \"iisnode\" -path 'x'");
        assert_eq!(map.get("Handler"), Some("iisnode"));
        assert_eq!(map.get("path"), Some("'x'"));
    }

    #[test]
    fn test_positional_value_keyed_by_empty_name() {
        let map = parse_map("loose -flag");
        assert_eq!(map.get(""), Some("loose"));
        assert_eq!(map.get("flag"), Some(""));
        assert!(map.contains("flag"));
    }

    #[test]
    fn test_serialize_keeps_order() {
        let map = parse_map("-z 1 -a 2");
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"z":"1","a":"2"}"#);
    }
}
