//! Encode parameter pairs to various output formats.
//!
//! This module renders a pair sequence as plain text, as a command line, or
//! as JSON. YAML, TOML and CBOR are produced by the CLI tool.

use crate::map::ParameterMap;
use crate::pair::NameValuePair;

/// Output format for encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `name=value` lines
    Text,
    /// `-name value` joined by spaces
    CommandLine,
    /// JSON array of `{ "name", "value" }` objects
    Json,
    /// YAML
    Yaml,
    /// TOML
    Toml,
    /// CBOR (binary)
    Cbor,
}

/// Encode pairs to a string in the specified format.
///
/// Note: YAML, TOML, and CBOR formats are handled externally by the CLI tool
/// (binpsparams) using dedicated libraries. Calling this function with those
/// formats will panic.
pub fn encode(pairs: &[NameValuePair], format: Format) -> String {
    match format {
        Format::Text => encode_text(pairs),
        Format::CommandLine => to_command_line(pairs),
        Format::Json => encode_json(pairs),
        Format::Yaml | Format::Toml | Format::Cbor => {
            panic!(
                "Format {:?} must be handled by the CLI tool, not libpsparams::encode",
                format
            )
        }
    }
}

/// Encode a parameter map. JSON output is an object keyed by name; the
/// other formats render the map's entries in order.
pub fn encode_map(map: &ParameterMap, format: Format) -> String {
    match format {
        Format::Json => {
            let mut out = serde_json::to_string_pretty(map).unwrap_or_default();
            out.push('\n');
            out
        }
        _ => encode(map.pairs(), format),
    }
}

/// Render pairs back into a parameter string.
///
/// For input without brackets, quotes or escapes, parsing the result gives
/// back the same pairs.
pub fn to_command_line(pairs: &[NameValuePair]) -> String {
    pairs
        .iter()
        .map(|p| p.to_string())
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

fn encode_text(pairs: &[NameValuePair]) -> String {
    let mut out = String::new();
    for pair in pairs {
        out.push_str(&pair.name);
        out.push('=');
        out.push_str(&pair.value);
        out.push('\n');
    }
    out
}

fn encode_json(pairs: &[NameValuePair]) -> String {
    // Pairs are plain strings, serialization cannot fail.
    let mut out = serde_json::to_string_pretty(pairs).unwrap_or_default();
    out.push('\n');
    out
}
