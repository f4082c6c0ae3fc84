//! Build orchestration.
//!
//! ```text
//! build_site()
//!     │
//!     ├── read_files()      content dir → file map (front matter → meta)
//!     ├── expand()          directives → one entry per record
//!     ├── write_files()     file map → output dir
//!     └── write_manifest()  optional, metadata of every entry
//! ```

use crate::{
    config::Config,
    data::SourceRegistry,
    expand::{ExpandReport, Expander, Files},
    log, site,
};
use anyhow::{Context, Result};
use std::fs;

/// Read the content directory and expand every directive in memory.
pub fn expand_site(config: &Config, registry: SourceRegistry) -> Result<(Files, ExpandReport)> {
    let content = &config.build.content;
    let mut files = site::read_files(content)
        .with_context(|| format!("Failed to read content from {}", content.display()))?;
    log!("build"; "read {} files", files.len());

    let report = Expander::new(config)
        .with_registry(registry)
        .expand(&mut files)
        .context("Expansion failed")?;

    log!(
        "expand";
        "{} directives, {} templates consumed, {} entries",
        report.directives, report.templates, report.written
    );
    Ok((files, report))
}

/// Expand and write the whole site.
///
/// When `clean` is true the output directory is removed first.
pub fn build_site(config: &Config, clean: bool) -> Result<ExpandReport> {
    let (files, report) = expand_site(config, SourceRegistry::default())?;
    let output = &config.build.output;

    if clean && output.exists() {
        fs::remove_dir_all(output)
            .with_context(|| format!("Failed to clear output directory: {}", output.display()))?;
    }

    let written = site::write_files(output, &files)?;

    if config.build.manifest {
        let path = site::write_manifest(output, &files)?;
        log!("build"; "manifest: {}", path.display());
    }

    if written == 0 {
        log!("warn"; "output is empty, check the content directory");
    } else {
        log!("build"; "done, {} files in {}", written, output.display());
    }

    Ok(report)
}

/// Expand in memory and return the resulting file names.
pub fn list_files(config: &Config) -> Result<Vec<String>> {
    let (files, _) = expand_site(config, SourceRegistry::default())?;
    Ok(files.into_keys().collect())
}
