//! TOML transcoding: render parameters as TOML text.
//!
//! Mapping:
//!   - pair sequence -> array of tables `[[parameter]]` with `name`, `value`
//!   - parameter map -> top-level `name = "value"` keys
//!
//! TOML keys may be empty when quoted, so positional values in a map are
//! written as `"" = "value"`.

use libpsparams::{NameValuePair, ParameterMap};
use toml_edit::{value, ArrayOfTables, DocumentMut, Item, Table};

use super::Document;

/// Encode a document as a TOML string.
pub fn encode(doc: &Document) -> Result<String, String> {
    let toml = match doc {
        Document::Pairs(pairs) => pairs_to_toml(pairs),
        Document::Map(map) => map_to_toml(map),
    };
    Ok(toml.to_string())
}

fn pairs_to_toml(pairs: &[NameValuePair]) -> DocumentMut {
    let mut doc = DocumentMut::new();
    if pairs.is_empty() {
        return doc;
    }
    let mut array = ArrayOfTables::new();
    for pair in pairs {
        let mut table = Table::new();
        table.insert("name", value(pair.name.as_str()));
        table.insert("value", value(pair.value.as_str()));
        array.push(table);
    }
    doc.as_table_mut()
        .insert("parameter", Item::ArrayOfTables(array));
    doc
}

fn map_to_toml(map: &ParameterMap) -> DocumentMut {
    let mut doc = DocumentMut::new();
    for (name, v) in map.iter() {
        doc.as_table_mut().insert(name, value(v));
    }
    doc
}
