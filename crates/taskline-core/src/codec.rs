//! On-disk shape of the store: `{ "lists": { <name>: [ <task>... ] } }`.

use indexmap::IndexMap;
use serde::Deserialize;
use thiserror::Error;

use crate::task::{Document, TaskList};

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Store root is not a JSON object")]
    NotADocument,
    #[error("Malformed store: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decoded {
    pub document: Document,
    /// `lists` was absent (or null) and has been filled in as empty.
    pub lists_injected: bool,
}

#[derive(Deserialize)]
struct RawDocument {
    #[serde(default)]
    lists: Option<IndexMap<String, TaskList>>,
}

pub fn encode(document: &Document) -> Result<String, CodecError> {
    let mut text = serde_json::to_string_pretty(document)?;
    text.push('\n');
    Ok(text)
}

pub fn decode(text: &str) -> Result<Decoded, CodecError> {
    // serde would happily read a struct from a JSON array, so the object
    // check has to happen before deserializing.
    if !text.trim_start().starts_with('{') {
        return Err(CodecError::NotADocument);
    }
    let raw: RawDocument = serde_json::from_str(text)?;
    let lists_injected = raw.lists.is_none();
    Ok(Decoded {
        document: Document {
            lists: raw.lists.unwrap_or_default(),
        },
        lists_injected,
    })
}

pub fn decode_bytes(bytes: &[u8]) -> Result<Decoded, CodecError> {
    let text = std::str::from_utf8(bytes).map_err(|_| CodecError::NotADocument)?;
    decode(text.strip_prefix('\u{feff}').unwrap_or(text))
}
