//! Data sources for directive expansion.
//!
//! A directive names its source with `source_file`; the [`DataLoader`]
//! turns that name into an ordered list of records. Computational sources
//! (registered producers, scripts) win over static JSON documents.

mod loader;
mod registry;

pub use loader::{DataLoader, LoadError};
pub use registry::{BoxError, Computed, Producer, SourceRegistry};
