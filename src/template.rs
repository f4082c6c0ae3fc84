//! Filename templates.
//!
//! A filename pattern is a path with colon-prefixed parameters that point
//! into the composed record:
//!
//! ```text
//! :collection/:data.slug     + { collection: "pages", data: { slug: "About Us" } }
//!                            → pages/about-us.html
//! ```
//!
//! Every parameter value is slugified before substitution. A pattern only
//! becomes a filename when no parameter is left over afterwards.

use crate::utils::{slug::slugify, value};
use regex::{Captures, Regex};
use serde_json::Value;
use std::sync::LazyLock;
use thiserror::Error;

/// Extension used when a directive does not set one.
pub const DEFAULT_EXTENSION: &str = ".html";

/// Stem used when a record has no filename pattern at all.
const FALLBACK_STEM: &str = "not_found";

/// `:name` or `:dotted.path.name`, ASCII word characters only.
static PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r":([0-9A-Za-z_]+(?:\.[0-9A-Za-z_]+)*)").unwrap());

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("couldn't build filename from `{pattern}`: unresolved {}", .missing.join(", "))]
    Unresolved {
        /// Pattern after all resolvable parameters were substituted.
        pattern: String,
        /// Parameters still present, without the leading colon.
        missing: Vec<String>,
    },
}

/// Parameter names in order of appearance, without the leading colon.
pub fn params(pattern: &str) -> Vec<&str> {
    PARAM_RE
        .captures_iter(pattern)
        .filter_map(|caps| caps.get(1).map(|m| m.as_str()))
        .collect()
}

/// Substitute every resolvable parameter of `pattern` against `record`.
///
/// Parameters whose value is missing or falsy stay in place untouched.
/// All occurrences of a repeated parameter are replaced in one pass.
pub fn substitute(pattern: &str, record: &Value) -> String {
    PARAM_RE
        .replace_all(pattern, |caps: &Captures| {
            match value::get(record, &caps[1]).filter(|v| value::is_truthy(v)) {
                Some(v) => slugify(&value::to_text(v)),
                None => caps[0].to_owned(),
            }
        })
        .into_owned()
}

/// Build the output filename for one composed record.
///
/// - `pattern` absent → `not_found` + extension
/// - all parameters resolved → pattern + extension, or pattern + `/index`
///   + extension when `as_permalink` is set
/// - anything left unresolved → [`TemplateError::Unresolved`]
pub fn build_filename(
    pattern: Option<&str>,
    record: &Value,
    extension: Option<&str>,
    as_permalink: bool,
) -> Result<String, TemplateError> {
    let extension = extension.filter(|ext| !ext.is_empty()).unwrap_or(DEFAULT_EXTENSION);

    let Some(pattern) = pattern else {
        return Ok(format!("{FALLBACK_STEM}{extension}"));
    };

    let resolved = substitute(pattern, record);
    let missing = params(&resolved);
    if !missing.is_empty() {
        return Err(TemplateError::Unresolved {
            missing: missing.into_iter().map(str::to_owned).collect(),
            pattern: resolved,
        });
    }

    Ok(if as_permalink {
        format!("{resolved}/index{extension}")
    } else {
        format!("{resolved}{extension}")
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_params_in_order() {
        assert_eq!(
            params(":collection/:data.slug/:data.meta.year"),
            vec!["collection", "data.slug", "data.meta.year"]
        );
    }

    #[test]
    fn test_params_none() {
        assert!(params("static/path").is_empty());
        assert!(params("a:/b").is_empty());
    }

    #[test]
    fn test_params_stop_at_trailing_dot() {
        // a dot followed by word chars extends the path, a bare trailing dot does not
        assert_eq!(params(":name.html"), vec!["name.html"]);
        assert_eq!(params(":name."), vec!["name"]);
    }

    #[test]
    fn test_build_filename_simple() {
        let record = json!({"data": {"slug": "Hello World"}});
        let name = build_filename(Some("posts/:data.slug"), &record, None, false).unwrap();
        assert_eq!(name, "posts/hello-world.html");
    }

    #[test]
    fn test_build_filename_permalink() {
        let record = json!({"data": {"slug": "Ada Lovelace"}});
        let name = build_filename(Some("people/:data.slug"), &record, Some(".html"), true).unwrap();
        assert_eq!(name, "people/ada-lovelace/index.html");
    }

    #[test]
    fn test_build_filename_custom_extension() {
        let record = json!({"data": {"id": 7}});
        let name = build_filename(Some("feed/:data.id"), &record, Some(".xml"), false).unwrap();
        assert_eq!(name, "feed/7.xml");
    }

    #[test]
    fn test_build_filename_empty_extension_defaults() {
        let record = json!({"data": {"id": 7}});
        let name = build_filename(Some(":data.id"), &record, Some(""), false).unwrap();
        assert_eq!(name, "7.html");
    }

    #[test]
    fn test_build_filename_without_pattern() {
        let record = json!({"data": {}});
        assert_eq!(build_filename(None, &record, None, false).unwrap(), "not_found.html");
        assert_eq!(build_filename(None, &record, Some(".md"), false).unwrap(), "not_found.md");
    }

    #[test]
    fn test_build_filename_missing_field() {
        let record = json!({"data": {"slug": "x"}});
        let err = build_filename(Some("a/:data.title"), &record, None, false).unwrap_err();
        assert_eq!(
            err,
            TemplateError::Unresolved {
                pattern: "a/:data.title".into(),
                missing: vec!["data.title".into()],
            }
        );
    }

    #[test]
    fn test_build_filename_falsy_fields_fail() {
        for falsy in [json!(""), json!(0), json!(false), json!(null)] {
            let record = json!({"data": {"slug": falsy}});
            assert!(build_filename(Some(":data.slug"), &record, None, false).is_err());
        }
    }

    #[test]
    fn test_build_filename_partial_resolution_reports_rest() {
        let record = json!({"collection": "Blog", "data": {}});
        let err = build_filename(Some(":collection/:data.slug"), &record, None, false).unwrap_err();
        let TemplateError::Unresolved { pattern, missing } = err;
        assert_eq!(pattern, "blog/:data.slug");
        assert_eq!(missing, vec!["data.slug"]);
    }

    #[test]
    fn test_repeated_param_resolves_everywhere() {
        let record = json!({"data": {"slug": "Same Thing"}});
        let name = build_filename(Some(":data.slug/:data.slug"), &record, None, false).unwrap();
        assert_eq!(name, "same-thing/same-thing.html");
    }

    #[test]
    fn test_param_prefix_of_longer_param() {
        let record = json!({"data": {"slug": "short", "slugline": "Long One"}});
        let name = build_filename(Some(":data.slugline-:data.slug"), &record, None, false).unwrap();
        assert_eq!(name, "long-one-short.html");
    }

    #[test]
    fn test_resolved_filename_has_no_params() {
        let record = json!({
            "collection": "Docs",
            "data": {"section": "Getting Started", "page": {"title": "Install: Linux"}}
        });
        let name = build_filename(
            Some(":collection/:data.section/:data.page.title"),
            &record,
            Some(".html"),
            false,
        )
        .unwrap();
        assert!(params(&name).is_empty());
        assert!(name.ends_with(".html"));
        assert_eq!(name, "docs/getting-started/install-linux.html");
    }

    #[test]
    fn test_unresolved_error_message() {
        let record = json!({});
        let err = build_filename(Some(":a/:b"), &record, None, false).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains(":a/:b"));
        assert!(msg.contains("a, b"));
    }

    #[test]
    fn test_object_param_slugifies_to_fixed_token() {
        let record = json!({"data": {"author": {"name": "Ada"}}});
        let name = build_filename(Some("by/:data.author"), &record, None, false).unwrap();
        assert_eq!(name, "by/object-object.html");
    }
}
