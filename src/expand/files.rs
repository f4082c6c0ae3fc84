//! Site file entries.

use crate::utils::value;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// All files of one build, keyed by `/`-separated path relative to the
/// content directory.
pub type Files = BTreeMap<String, FileEntry>;

/// One site file: its body plus arbitrary metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileEntry {
    #[serde(default)]
    pub contents: String,

    #[serde(flatten)]
    pub meta: Map<String, Value>,
}

impl FileEntry {
    pub fn new(contents: impl Into<String>) -> Self {
        Self {
            contents: contents.into(),
            meta: Map::new(),
        }
    }

    /// Builder-style metadata insert.
    pub fn with_meta(mut self, key: impl Into<String>, value: Value) -> Self {
        self.meta.insert(key.into(), value);
        self
    }

    /// Split a composed record into body and metadata.
    ///
    /// The `contents` field becomes the body; a non-string `contents` is
    /// rendered as text.
    pub fn from_value(record: Value) -> Self {
        match record {
            Value::Object(mut meta) => {
                let contents = match meta.remove("contents") {
                    Some(Value::String(s)) => s,
                    Some(other) => value::to_text(&other),
                    None => String::new(),
                };
                Self { contents, meta }
            }
            other => Self::new(value::to_text(&other)),
        }
    }
}
