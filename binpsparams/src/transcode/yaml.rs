//! YAML transcoding: render parameters as YAML text.
//!
//! Pairs become a sequence of `{ name, value }` mappings; a parameter map
//! becomes a single mapping in first-seen order.

use super::Document;

/// Encode a document as a YAML string.
pub fn encode(doc: &Document) -> Result<String, String> {
    serde_yaml::to_string(doc).map_err(|e| format!("YAML encode error: {}", e))
}
