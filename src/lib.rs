//! json-files - expand directive files into one page per data record.
//!
//! A site file carrying a `json_files` directive names a data source and a
//! filename pattern. Each record of the source becomes a new file whose
//! name is the pattern with its `:dotted.params` resolved and slugified.
//!
//! ```ignore
//! use json_files::{Expander, FileEntry, Files, config::Config};
//! use serde_json::json;
//!
//! let mut config = Config::default();
//! config.json_files.source_path = "data".into();
//!
//! let mut files = Files::new();
//! files.insert(
//!     "people.html".into(),
//!     FileEntry::new("").with_meta("json_files", json!({
//!         "source_file": "people",
//!         "filename_pattern": "people/:data.slug",
//!         "as_permalink": true,
//!     })),
//! );
//!
//! Expander::new(&config).expand(&mut files)?;
//! // files now holds people/ada-lovelace/index.html, ...
//! ```

pub mod build;
pub mod cli;
pub mod config;
pub mod data;
pub mod expand;
pub mod logger;
pub mod site;
pub mod template;
pub mod utils;

pub use expand::{ExpandError, ExpandReport, Expander, FileEntry, Files};
