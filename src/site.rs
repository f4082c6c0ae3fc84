//! Reading site files from disk and writing them back.
//!
//! Files may start with TOML front matter fenced by `+++` lines:
//!
//! ```text
//! +++
//! title = "People"
//!
//! [json_files]
//! source_file = "people"
//! filename_pattern = "people/:data.slug"
//! +++
//! <h1>{{ data.name }}</h1>
//! ```
//!
//! The table becomes the entry's metadata, the rest its contents.

use crate::{
    expand::{FileEntry, Files},
    log,
};
use anyhow::{Context, Result, bail};
use serde_json::Value;
use std::{
    fs,
    path::{Component, Path, PathBuf},
};
use walkdir::WalkDir;

/// Line that opens and closes the front matter block.
const FRONT_MATTER_FENCE: &str = "+++";

/// File written next to the output when the manifest is enabled.
pub const MANIFEST_NAME: &str = "manifest.json";

/// Read every file under `content_dir` into a file map.
///
/// Files that are not valid UTF-8 are skipped with a warning.
pub fn read_files(content_dir: &Path) -> Result<Files> {
    let mut files = Files::new();

    for entry in WalkDir::new(content_dir).sort_by_file_name() {
        let entry = entry.with_context(|| format!("Failed to walk {}", content_dir.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let path = entry.path();
        let key = file_key(path.strip_prefix(content_dir)?);
        let bytes = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
        let Ok(text) = String::from_utf8(bytes) else {
            log!("warn"; "skipping non UTF-8 file {}", key);
            continue;
        };

        let file = parse_file(&text).with_context(|| format!("Invalid front matter in {key}"))?;
        files.insert(key, file);
    }

    Ok(files)
}

/// Split front matter from contents.
pub fn parse_file(text: &str) -> Result<FileEntry> {
    let Some((front_matter, contents)) = split_front_matter(text)? else {
        return Ok(FileEntry::new(text));
    };

    let table: toml::Table = toml::from_str(front_matter)?;
    let Value::Object(meta) = serde_json::to_value(table)? else {
        bail!("front matter is not a table");
    };

    Ok(FileEntry {
        contents: contents.to_owned(),
        meta,
    })
}

/// Returns `None` when the text has no front matter at all.
fn split_front_matter(text: &str) -> Result<Option<(&str, &str)>> {
    let Some(rest) = text.strip_prefix(FRONT_MATTER_FENCE) else {
        return Ok(None);
    };
    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == FRONT_MATTER_FENCE {
            return Ok(Some((&rest[..offset], &rest[offset + line.len()..])));
        }
        offset += line.len();
    }

    bail!("missing closing `{FRONT_MATTER_FENCE}`")
}

/// `/`-separated key for a path relative to the content directory.
fn file_key(relative: &Path) -> String {
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

/// Output path for a file key, refusing keys that would escape `output`.
fn output_path(output: &Path, key: &str) -> Result<PathBuf> {
    let relative = Path::new(key);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir))
    {
        bail!("Refusing to write `{key}` outside of {}", output.display());
    }
    Ok(output.join(relative))
}

/// Write every entry's contents below `output`. Returns the number of files written.
pub fn write_files(output: &Path, files: &Files) -> Result<usize> {
    for (key, entry) in files {
        let path = output_path(output, key)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &entry.contents)
            .with_context(|| format!("Failed to write {}", path.display()))?;
    }
    Ok(files.len())
}

/// Write the metadata of every entry as one JSON object keyed by file.
pub fn write_manifest(output: &Path, files: &Files) -> Result<PathBuf> {
    let manifest: serde_json::Map<String, Value> = files
        .iter()
        .map(|(key, entry)| (key.clone(), Value::Object(entry.meta.clone())))
        .collect();

    fs::create_dir_all(output)?;
    let path = output.join(MANIFEST_NAME);
    fs::write(&path, serde_json::to_string_pretty(&manifest)?)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}
