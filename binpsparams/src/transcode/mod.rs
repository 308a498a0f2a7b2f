//! Transcoders for output formats that need a dedicated library.

use libpsparams::{NameValuePair, ParameterMap};
use serde::{Serialize, Serializer};

pub mod cbor;
pub mod toml;
pub mod yaml;

/// What the CLI is about to write: the pair sequence or the keyed view.
#[derive(Debug, Clone, Copy)]
pub enum Document<'a> {
    Pairs(&'a [NameValuePair]),
    Map(&'a ParameterMap),
}

impl Serialize for Document<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Document::Pairs(pairs) => pairs.serialize(serializer),
            Document::Map(map) => map.serialize(serializer),
        }
    }
}
