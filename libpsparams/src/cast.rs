//! Typed casting of parameter values.
//!
//! Deployment templates declare a type per parameter. Override values come
//! in as text and are converted before being sent on:
//! - `int`, `bool`, `object`, `secureobject`, `array`: parsed as JSON
//! - `string`, `securestring`: parsed as the body of a JSON string, so
//!   escapes such as `\n` are interpreted
//! - anything else: passed through as a string

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde_json::Value;

use crate::error::{ParseError, Result};

/// Declared type of a template parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParameterType {
    Int,
    Bool,
    Object,
    SecureObject,
    Array,
    String,
    SecureString,
    /// Unrecognized type name, kept as written.
    Other(String),
}

impl FromStr for ParameterType {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "int" => ParameterType::Int,
            "bool" => ParameterType::Bool,
            "object" => ParameterType::Object,
            "secureobject" => ParameterType::SecureObject,
            "array" => ParameterType::Array,
            "string" => ParameterType::String,
            "securestring" => ParameterType::SecureString,
            _ => ParameterType::Other(s.to_string()),
        })
    }
}

impl fmt::Display for ParameterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParameterType::Int => "int",
            ParameterType::Bool => "bool",
            ParameterType::Object => "object",
            ParameterType::SecureObject => "secureobject",
            ParameterType::Array => "array",
            ParameterType::String => "string",
            ParameterType::SecureString => "securestring",
            ParameterType::Other(name) => name,
        };
        f.write_str(name)
    }
}

/// Convert a textual value to the declared type.
pub fn cast_value(value: &str, ty: &ParameterType) -> Result<Value> {
    let parsed = match ty {
        ParameterType::Int
        | ParameterType::Bool
        | ParameterType::Object
        | ParameterType::SecureObject
        | ParameterType::Array => serde_json::from_str(value),
        ParameterType::String | ParameterType::SecureString => {
            serde_json::from_str(&format!("\"{}\"", value))
        }
        ParameterType::Other(_) => return Ok(Value::String(value.to_string())),
    };
    parsed.map_err(|e| ParseError::InvalidValue {
        type_name: ty.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn ty(name: &str) -> ParameterType {
        name.parse().unwrap()
    }

    #[test]
    fn test_type_names_are_case_insensitive() {
        assert_eq!(ty("Int"), ParameterType::Int);
        assert_eq!(ty("SECURESTRING"), ParameterType::SecureString);
        assert_eq!(ty("customType"), ParameterType::Other("customType".to_string()));
        assert_eq!(ty("customType").to_string(), "customType");
    }

    #[test]
    fn test_json_types() {
        assert_eq!(cast_value("42", &ParameterType::Int).unwrap(), json!(42));
        assert_eq!(cast_value("true", &ParameterType::Bool).unwrap(), json!(true));
        assert_eq!(
            cast_value("{\"a\": [1, 2]}", &ParameterType::Object).unwrap(),
            json!({"a": [1, 2]})
        );
        assert_eq!(
            cast_value("[\"x\"]", &ParameterType::Array).unwrap(),
            json!(["x"])
        );
    }

    #[test]
    fn test_invalid_json() {
        let err = cast_value("abc", &ParameterType::Int).unwrap_err();
        match err {
            ParseError::InvalidValue { type_name, .. } => assert_eq!(type_name, "int"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            cast_value("a\\tb", &ParameterType::String).unwrap(),
            json!("a\tb")
        );
        assert!(cast_value("a\"b", &ParameterType::SecureString).is_err());
    }

    #[test]
    fn test_other_passes_through() {
        assert_eq!(
            cast_value("{not json", &ty("unknown")).unwrap(),
            json!("{not json")
        );
    }
}
