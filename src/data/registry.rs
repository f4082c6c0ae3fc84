//! In-process data sources.
//!
//! Embedders can register data under a logical source name instead of
//! shipping a script. Registered sources take precedence over anything on
//! disk.

use rustc_hash::FxHashMap;
use serde_json::Value;
use std::{fmt, sync::Arc};

/// Error type returned by producers.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Zero-argument function that produces a data source's value on demand.
pub type Producer = Arc<dyn Fn() -> Result<Value, BoxError> + Send + Sync>;

/// A registered computational source.
#[derive(Clone)]
pub enum Computed {
    /// Used as-is.
    Value(Value),
    /// Invoked once per load.
    Producer(Producer),
}

impl Computed {
    /// Get the value, invoking the producer if there is one.
    pub fn produce(&self) -> Result<Value, BoxError> {
        match self {
            Self::Value(value) => Ok(value.clone()),
            Self::Producer(producer) => producer(),
        }
    }
}

impl fmt::Debug for Computed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Value(value) => f.debug_tuple("Value").field(value).finish(),
            Self::Producer(_) => f.write_str("Producer(..)"),
        }
    }
}

/// Computational sources keyed by the directive's `source_file` name.
#[derive(Debug, Clone, Default)]
pub struct SourceRegistry {
    sources: FxHashMap<String, Computed>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plain value.
    pub fn insert_value(&mut self, name: impl Into<String>, value: Value) {
        self.sources.insert(normalize(name.into()), Computed::Value(value));
    }

    /// Register a producer function, called every time the source is loaded.
    pub fn insert_producer<F>(&mut self, name: impl Into<String>, producer: F)
    where
        F: Fn() -> Result<Value, BoxError> + Send + Sync + 'static,
    {
        self.sources
            .insert(normalize(name.into()), Computed::Producer(Arc::new(producer)));
    }

    pub fn get(&self, name: &str) -> Option<&Computed> {
        self.sources.get(normalize(name.to_owned()).as_str())
    }
}

/// `./people` and `people` name the same source.
fn normalize(name: String) -> String {
    match name.strip_prefix("./") {
        Some(rest) => rest.to_owned(),
        None => name,
    }
}
