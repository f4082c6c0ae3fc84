//! Directive expansion.
//!
//! Every file carrying a `json_files` directive is turned into one new
//! file per record of its data source:
//!
//! ```text
//! about/team.html                       public output
//!   json_files:                         ─────────────────────────────────
//!     source_file = "people"      ──►   people/ada-lovelace/index.html
//!     filename_pattern =                people/grace-hopper/index.html
//!       "people/:data.slug"             ...
//!     as_permalink = true
//! ```
//!
//! # Algorithm
//!
//! 1. Validate the configuration and every directive. Any failure aborts
//!    before the file map is touched.
//! 2. Remove files whose directive sets `is_template`.
//! 3. Run one task per directive (on the rayon pool unless
//!    `[json_files] parallel = false`):
//!    load records, compose each with the directive, compute its filename,
//!    strip `properties_to_remove` and insert it.
//!
//! The file map is shared by all tasks. A filename produced twice keeps the
//! entry written last; entries are never merged. With `parallel = false`
//! directives run in path order, so the directive with the greatest path
//! wins a collision.
//!
//! The first task error raises a cancellation flag. Other tasks stop at
//! their next check (before loading, before each record) and the error is
//! returned once. Entries already written stay in the map.

mod directive;
mod files;

pub use directive::{DIRECTIVE_KEY, Directive};
pub use files::{FileEntry, Files};

use crate::{
    config::{Config, ConfigError},
    data::{DataLoader, LoadError, SourceRegistry},
    log,
    template::TemplateError,
    utils::value,
};
use parking_lot::Mutex;
use rayon::prelude::*;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExpandError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("invalid json_files directive in `{path}`: {reason}")]
    Directive { path: String, reason: String },

    #[error("`{path}`: {source}")]
    Template {
        path: String,
        #[source]
        source: TemplateError,
    },

    #[error("`{path}`: {source}")]
    Load {
        path: String,
        #[source]
        source: LoadError,
    },
}

/// Counts of one successful expansion.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ExpandReport {
    /// Files carrying a directive.
    pub directives: usize,
    /// Directive files removed because they were templates.
    pub templates: usize,
    /// Entries inserted (collisions count every write).
    pub written: usize,
}

/// One directive-bearing file, validated and ready to run.
#[derive(Debug)]
struct Job {
    path: String,
    directive: Directive,
    /// Body copied into every generated entry.
    contents: String,
}

/// Expands directives against one configuration.
pub struct Expander<'a> {
    config: &'a Config,
    loader: DataLoader,
}

impl<'a> Expander<'a> {
    /// Data sources are resolved against `config.source_dir()`.
    pub fn new(config: &'a Config) -> Self {
        Self {
            config,
            loader: DataLoader::new(config.source_dir(), config.loader.clone()),
        }
    }

    /// Make in-process data sources available to directives.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.loader = self.loader.with_registry(registry);
        self
    }

    /// Expand every directive in `files`, in place.
    pub fn expand(&self, files: &mut Files) -> Result<ExpandReport, ExpandError> {
        self.config.validate()?;

        let jobs = collect_jobs(files)?;
        let mut report = ExpandReport {
            directives: jobs.len(),
            ..ExpandReport::default()
        };

        for job in jobs.iter().filter(|job| job.directive.is_template) {
            files.remove(&job.path);
            report.templates += 1;
        }

        let output = Mutex::new(std::mem::take(files));
        let cancelled = AtomicBool::new(false);
        let first_error: Mutex<Option<ExpandError>> = Mutex::new(None);
        let written = AtomicUsize::new(0);

        let run = |job: &Job| {
            if cancelled.load(Ordering::Relaxed) {
                return;
            }
            match self.run_job(job, &output, &cancelled) {
                Ok(count) => {
                    written.fetch_add(count, Ordering::Relaxed);
                }
                Err(err) => {
                    if !cancelled.swap(true, Ordering::Relaxed) {
                        *first_error.lock() = Some(err);
                    }
                }
            }
        };

        if self.config.json_files.parallel {
            jobs.par_iter().for_each(&run);
        } else {
            jobs.iter().for_each(&run);
        }

        *files = output.into_inner();
        if let Some(err) = first_error.into_inner() {
            return Err(err);
        }

        report.written = written.into_inner();
        Ok(report)
    }

    /// Load and expand a single directive. Returns the number of entries written.
    fn run_job(
        &self,
        job: &Job,
        output: &Mutex<Files>,
        cancelled: &AtomicBool,
    ) -> Result<usize, ExpandError> {
        let records = self
            .loader
            .load(&job.directive.source_file)
            .map_err(|source| ExpandError::Load {
                path: job.path.clone(),
                source,
            })?;

        log!("load"; "{}: {} records from `{}`", job.path, records.len(), job.directive.source_file);

        let mut written = 0;
        for data in records {
            if cancelled.load(Ordering::Relaxed) {
                break;
            }

            let mut composed = job.directive.compose(&job.contents, data);
            let filename = job.directive.filename(&composed).map_err(|source| ExpandError::Template {
                path: job.path.clone(),
                source,
            })?;

            if let Some(fields) = composed.as_object_mut() {
                for property in &self.config.json_files.properties_to_remove {
                    fields.remove(property);
                }
            }

            output.lock().insert(filename, FileEntry::from_value(composed));
            written += 1;
        }

        log!("expand"; "{}: wrote {} files", job.path, written);
        Ok(written)
    }
}

/// Validate every directive before anything runs.
fn collect_jobs(files: &Files) -> Result<Vec<Job>, ExpandError> {
    files
        .iter()
        .filter_map(|(path, entry)| {
            entry
                .meta
                .get(DIRECTIVE_KEY)
                .filter(|raw| value::is_truthy(raw))
                .map(|raw| (path, entry, raw))
        })
        .map(|(path, entry, raw)| {
            let directive = Directive::from_value(raw).map_err(|reason| ExpandError::Directive {
                path: path.clone(),
                reason,
            })?;
            let contents = if directive.is_template {
                entry.contents.clone()
            } else {
                String::new()
            };
            Ok(Job {
                path: path.clone(),
                directive,
                contents,
            })
        })
        .collect()
}
