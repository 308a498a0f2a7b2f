//! CBOR transcoding: render parameters as CBOR binary data.
//!
//! Pairs become an array of two-entry maps (`name`, `value` text strings);
//! a parameter map becomes a single map with text string keys.

use super::Document;

/// Encode a document as CBOR bytes.
pub fn encode(doc: &Document) -> Result<Vec<u8>, String> {
    let mut out = Vec::new();
    ciborium::ser::into_writer(doc, &mut out)
        .map_err(|e| format!("CBOR encode error: {:?}", e))?;
    Ok(out)
}
