//! `[json_files]` section configuration.
//!
//! Options of the expansion step itself.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};

/// `[json_files]` section in json-files.toml.
///
/// # Example
/// ```toml
/// [json_files]
/// source_path = "data"
/// properties_to_remove = ["source_file", "filename_pattern"]
/// parallel = false
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct JsonFilesConfig {
    /// Directory that directive `source_file` paths are relative to,
    /// itself relative to the project root. `~` is expanded.
    #[serde(default)]
    pub source_path: String,

    /// Keys removed from every generated entry before it is stored.
    #[serde(default = "defaults::json_files::properties_to_remove")]
    #[educe(Default = defaults::json_files::properties_to_remove())]
    pub properties_to_remove: Vec<String>,

    /// Process directives on the rayon pool. When false they run one after
    /// another in path order, which makes colliding filenames deterministic.
    #[serde(default = "defaults::r#true")]
    #[educe(Default = defaults::r#true())]
    pub parallel: bool,
}

#[cfg(test)]
mod tests {
    use super::super::Config;

    #[test]
    fn test_json_files_defaults() {
        let config: Config = toml::from_str(
            r#"
            [json_files]
            source_path = "data"
        "#,
        )
        .unwrap();

        assert_eq!(config.json_files.source_path, "data");
        assert_eq!(
            config.json_files.properties_to_remove,
            vec!["source_file", "filename_pattern", "as_permalink"]
        );
        assert!(config.json_files.parallel);
    }

    #[test]
    fn test_json_files_custom_properties() {
        let config: Config = toml::from_str(
            r#"
            [json_files]
            source_path = "data"
            properties_to_remove = []
            parallel = false
        "#,
        )
        .unwrap();

        assert!(config.json_files.properties_to_remove.is_empty());
        assert!(!config.json_files.parallel);
    }

    #[test]
    fn test_json_files_unknown_field_rejection() {
        let result: Result<Config, _> = toml::from_str(
            r#"
            [json_files]
            source_path = "data"
            source_dir = "data"
        "#,
        );
        assert!(result.is_err());
    }
}
