//! Name/value pair representation.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::cast::{cast_value, ParameterType};
use crate::error::Result;

/// One parameter from a parsed string.
///
/// `name` has its leading `-` stripped and is empty for positional values.
/// `value` is empty for a flag that had no value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NameValuePair {
    pub name: String,
    pub value: String,
}

impl NameValuePair {
    /// Create a pair from anything string-like.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    /// Returns `true` if this pair is a value with no parameter name.
    pub fn is_positional(&self) -> bool {
        self.name.is_empty()
    }

    /// Returns `true` if this pair is a name with no value.
    pub fn is_flag(&self) -> bool {
        self.value.is_empty()
    }

    /// Convert the value to the declared parameter type.
    pub fn cast(&self, ty: &ParameterType) -> Result<serde_json::Value> {
        cast_value(&self.value, ty)
    }
}

impl fmt::Display for NameValuePair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.name.is_empty(), self.value.is_empty()) {
            (true, _) => write!(f, "{}", self.value),
            (false, true) => write!(f, "-{}", self.name),
            (false, false) => write!(f, "-{} {}", self.name, self.value),
        }
    }
}

impl<N: Into<String>, V: Into<String>> From<(N, V)> for NameValuePair {
    fn from((name, value): (N, V)) -> Self {
        Self::new(name, value)
    }
}
