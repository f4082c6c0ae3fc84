//! The `json_files` directive.
//!
//! ```toml
//! +++
//! [json_files]
//! source_file = "people"
//! filename_pattern = "people/:data.slug"
//! as_permalink = true
//! is_template = true
//! layout = "person.html"      # passed through to every generated entry
//! +++
//! ```

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::{
    template::{self, TemplateError},
    utils::value,
};

/// Metadata key carrying the directive.
pub const DIRECTIVE_KEY: &str = "json_files";

/// Typed view used to check the required shape. Unknown keys are allowed.
#[derive(Debug, Deserialize)]
struct Shape {
    source_file: String,
    filename_pattern: String,
    #[serde(default)]
    as_permalink: Option<bool>,
    #[serde(default)]
    extension: Option<String>,
    #[serde(default)]
    is_template: Option<Value>,
}

/// A validated directive.
#[derive(Debug, Clone, PartialEq)]
pub struct Directive {
    pub source_file: String,
    pub filename_pattern: String,
    pub as_permalink: bool,
    pub extension: Option<String>,
    pub is_template: bool,
    /// Every key of the directive as written, including unknown ones.
    pub fields: Map<String, Value>,
}

impl Directive {
    /// Validate a raw directive value.
    ///
    /// Returns the reason as text on failure.
    pub fn from_value(raw: &Value) -> Result<Self, String> {
        let Value::Object(fields) = raw else {
            return Err(format!("expected a table, found `{raw}`"));
        };

        let shape = Shape::deserialize(raw).map_err(|err| err.to_string())?;

        if shape.source_file.is_empty() {
            return Err("`source_file` must not be empty".into());
        }
        if shape.filename_pattern.is_empty() {
            return Err("`filename_pattern` must not be empty".into());
        }

        Ok(Self {
            source_file: shape.source_file,
            filename_pattern: shape.filename_pattern,
            as_permalink: shape.as_permalink.unwrap_or(false),
            extension: shape.extension,
            is_template: shape.is_template.as_ref().is_some_and(value::is_truthy),
            fields: fields.clone(),
        })
    }

    /// Merge the record for one data element, later layers winning:
    /// `{contents}` ← directive fields ← `{data}`.
    pub fn compose(&self, contents: &str, data: Value) -> Value {
        let mut composed = Map::with_capacity(self.fields.len() + 2);
        composed.insert("contents".into(), Value::String(contents.to_owned()));
        composed.extend(self.fields.iter().map(|(k, v)| (k.clone(), v.clone())));
        composed.insert("data".into(), data);
        Value::Object(composed)
    }

    /// Output filename for a record composed by [`Directive::compose`].
    pub fn filename(&self, composed: &Value) -> Result<String, TemplateError> {
        template::build_filename(
            Some(&self.filename_pattern),
            composed,
            self.extension.as_deref(),
            self.as_permalink,
        )
    }
}
