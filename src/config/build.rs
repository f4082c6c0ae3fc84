//! `[build]` section configuration.
//!
//! Where site files are read from and written to.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in json-files.toml.
///
/// # Example
/// ```toml
/// [build]
/// content = "content"
/// output = "public"
/// manifest = true
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root directory. Directive sources and the directories below
    /// are resolved against it.
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Directory scanned for site files.
    #[serde(default = "defaults::build::content")]
    #[educe(Default = defaults::build::content())]
    pub content: PathBuf,

    /// Directory generated files are written to.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Also write `manifest.json` with every entry's metadata.
    #[serde(default = "defaults::r#false")]
    #[educe(Default = defaults::r#false())]
    pub manifest: bool,
}

#[cfg(test)]
mod tests {
    use super::super::Config;
    use std::path::PathBuf;

    #[test]
    fn test_build_config_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.build.root, None);
        assert_eq!(config.build.content, PathBuf::from("content"));
        assert_eq!(config.build.output, PathBuf::from("public"));
        assert!(!config.build.manifest);
    }

    #[test]
    fn test_build_config_full() {
        let config: Config = toml::from_str(
            r#"
            [build]
            root = "site"
            content = "src"
            output = "dist"
            manifest = true
        "#,
        )
        .unwrap();
        assert_eq!(config.build.root, Some(PathBuf::from("site")));
        assert_eq!(config.build.content, PathBuf::from("src"));
        assert_eq!(config.build.output, PathBuf::from("dist"));
        assert!(config.build.manifest);
    }
}
