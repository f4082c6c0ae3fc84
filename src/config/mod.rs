//! Project configuration management for `json-files.toml`.
//!
//! # Sections
//!
//! | Section        | Purpose                                          |
//! |----------------|--------------------------------------------------|
//! | `[json_files]` | Data source root, stripped keys, parallelism     |
//! | `[loader]`     | How script data sources are executed             |
//! | `[build]`      | Project root, content and output directories     |
//!
//! # Example
//!
//! ```toml
//! [json_files]
//! source_path = "data"
//!
//! [loader]
//! interpreter = ["sh"]
//!
//! [build]
//! content = "content"
//! output = "public"
//! ```

mod build;
pub mod defaults;
mod error;
mod json_files;
mod loader;

pub use build::BuildConfig;
pub use error::ConfigError;
pub use json_files::JsonFilesConfig;
pub use loader::LoaderConfig;

use crate::cli::{Cli, Commands};
use anyhow::{Context, Result};
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Root configuration structure representing json-files.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Absolute path to the config file (set after loading)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Expansion settings
    #[serde(default)]
    pub json_files: JsonFilesConfig,

    /// Data loader settings
    #[serde(default)]
    pub loader: LoaderConfig,

    /// Build paths
    #[serde(default)]
    pub build: BuildConfig,
}

impl Config {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Directory that directive `source_file` paths are joined onto.
    ///
    /// `~` is expanded; relative paths are taken from the project root.
    pub fn source_dir(&self) -> PathBuf {
        let expanded = shellexpand::tilde(&self.json_files.source_path).into_owned();
        let path = PathBuf::from(expanded);
        if path.is_relative() {
            self.get_root().join(path)
        } else {
            path
        }
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .clone()
            .unwrap_or_else(|| self.get_root().to_owned());

        Self::update_option(&mut self.build.content, cli.content.as_ref());
        Self::update_option(&mut self.build.output, cli.output.as_ref());

        let root = Self::normalize_path(&root);
        self.config_path = Self::normalize_path(&root.join(&cli.config));
        self.build.content = Self::normalize_path(&root.join(&self.build.content));
        self.build.output = Self::normalize_path(&root.join(&self.build.output));
        self.set_root(&root);

        if cli.sequential {
            self.json_files.parallel = false;
        }

        if let Commands::Build { manifest, .. } = &cli.command {
            Self::update_option(&mut self.build.manifest, manifest.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Check the required shape of the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.json_files.source_path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "[json_files.source_path] is required".into(),
            ));
        }

        if self
            .json_files
            .properties_to_remove
            .iter()
            .any(|p| p.is_empty())
        {
            return Err(ConfigError::Validation(
                "[json_files.properties_to_remove] must not contain empty names".into(),
            ));
        }

        if self.loader.interpreter.is_empty() {
            return Err(ConfigError::Validation(
                "[loader.interpreter] must have at least one element".into(),
            ));
        }

        if self.loader.script_extension.starts_with('.') {
            return Err(ConfigError::Validation(
                "[loader.script_extension] must not start with a dot".into(),
            ));
        }

        Ok(())
    }

    /// Check that the loader interpreter is installed and available
    pub fn check_interpreter_installed(&self) -> Result<()> {
        let Some(cmd) = self.loader.interpreter.first() else {
            return Ok(());
        };
        which::which(cmd).with_context(|| {
            format!("`{cmd}` from [loader.interpreter] not found. Please install it first.")
        })?;
        Ok(())
    }
}

// ============================================================================
// Tests
// ============================================================================
