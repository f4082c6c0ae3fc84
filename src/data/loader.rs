//! Data source loading.
//!
//! A source name like `people` is resolved in this order:
//!
//! | Step | Source                          | Kind          |
//! |------|---------------------------------|---------------|
//! | 1    | registry entry `people`         | computational |
//! | 2    | `<source_dir>/people.sh` output | computational |
//! | 3    | `<source_dir>/people.json`      | static        |
//!
//! Only a missing source moves on to the next step. A source that exists
//! but fails (script exit code, invalid JSON, producer error) is reported
//! as is.

use super::registry::{BoxError, SourceRegistry};
use crate::config::LoaderConfig;
use serde_json::Value;
use std::{
    ffi::OsString,
    fs, io,
    path::{Path, PathBuf},
    process::{Command, ExitStatus},
};
use thiserror::Error;

/// Extension of static data sources, without the dot.
const STATIC_EXTENSION: &str = "json";

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("data source `{name}` not found (tried registry, {})", display_paths(.tried))]
    NotFound { name: String, tried: Vec<PathBuf> },

    #[error("IO error when reading `{0}`")]
    Io(PathBuf, #[source] io::Error),

    #[error("invalid JSON in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("script `{path}` exited with {status}: {stderr}")]
    Script {
        path: PathBuf,
        status: ExitStatus,
        stderr: String,
    },

    #[error("data source `{0}` failed")]
    Producer(String, #[source] BoxError),

    #[error("data source `{0}` is not a list of records")]
    NotASequence(String),
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| format!("`{}`", p.display()))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of one loading step.
#[derive(Debug)]
enum Attempt {
    Found(Value),
    NotFound,
}

/// Loads data sources relative to one source directory.
#[derive(Debug, Clone)]
pub struct DataLoader {
    source_dir: PathBuf,
    config: LoaderConfig,
    registry: SourceRegistry,
}

impl DataLoader {
    pub fn new(source_dir: impl Into<PathBuf>, config: LoaderConfig) -> Self {
        Self {
            source_dir: source_dir.into(),
            config,
            registry: SourceRegistry::default(),
        }
    }

    /// Use in-process sources in addition to the filesystem.
    pub fn with_registry(mut self, registry: SourceRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Load the records of the source named `name`.
    pub fn load(&self, name: &str) -> Result<Vec<Value>, LoadError> {
        let base = self.source_dir.join(name);
        let script = with_extension(&base, &self.config.script_extension);
        let document = with_extension(&base, STATIC_EXTENSION);

        let value = match self.load_computed(name, &script)? {
            Attempt::Found(value) => value,
            Attempt::NotFound => match load_static(&document)? {
                Attempt::Found(value) => value,
                Attempt::NotFound => {
                    return Err(LoadError::NotFound {
                        name: name.to_owned(),
                        tried: vec![script, document],
                    });
                }
            },
        };

        match value {
            Value::Array(records) => Ok(records),
            _ => Err(LoadError::NotASequence(name.to_owned())),
        }
    }

    /// Registry first, then a script next to the data files.
    fn load_computed(&self, name: &str, script: &Path) -> Result<Attempt, LoadError> {
        if let Some(source) = self.registry.get(name) {
            let value = source
                .produce()
                .map_err(|err| LoadError::Producer(name.to_owned(), err))?;
            return Ok(Attempt::Found(value));
        }

        if !script.is_file() {
            return Ok(Attempt::NotFound);
        }
        self.run_script(script).map(Attempt::Found)
    }

    /// Run a script data source and parse its standard output as JSON.
    fn run_script(&self, script: &Path) -> Result<Value, LoadError> {
        let (program, args) = self
            .config
            .interpreter
            .split_first()
            .ok_or_else(|| LoadError::Io(script.to_path_buf(), io::Error::other("empty interpreter")))?;

        let mut command = Command::new(program);
        command.args(args);
        // the script runs from its own directory, so it is passed by file name
        match (script.parent().filter(|dir| !dir.as_os_str().is_empty()), script.file_name()) {
            (Some(dir), Some(file_name)) => command.current_dir(dir).arg(file_name),
            _ => command.arg(script),
        };

        let output = command
            .output()
            .map_err(|err| LoadError::Io(script.to_path_buf(), err))?;

        if !output.status.success() {
            return Err(LoadError::Script {
                path: script.to_path_buf(),
                status: output.status,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_owned(),
            });
        }

        serde_json::from_slice(&output.stdout).map_err(|err| LoadError::Json(script.to_path_buf(), err))
    }
}

/// Read a static JSON document.
fn load_static(path: &Path) -> Result<Attempt, LoadError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Attempt::NotFound),
        Err(err) => return Err(LoadError::Io(path.to_path_buf(), err)),
    };
    serde_json::from_str(&content)
        .map(Attempt::Found)
        .map_err(|err| LoadError::Json(path.to_path_buf(), err))
}

/// Append `.ext` without replacing an existing extension (`v1.2` → `v1.2.json`).
fn with_extension(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn loader(dir: &TempDir) -> DataLoader {
        DataLoader::new(dir.path(), LoaderConfig::default())
    }

    #[test]
    fn test_with_extension_appends() {
        assert_eq!(with_extension(Path::new("data/people"), "json"), PathBuf::from("data/people.json"));
        assert_eq!(with_extension(Path::new("data/v1.2"), "json"), PathBuf::from("data/v1.2.json"));
    }

    #[test]
    fn test_load_static_json() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("people.json"), r#"[{"slug": "ada"}, {"slug": "grace"}]"#).unwrap();

        let records = loader(&dir).load("people").unwrap();
        assert_eq!(records, vec![json!({"slug": "ada"}), json!({"slug": "grace"})]);
    }

    #[test]
    fn test_load_nested_source_name() {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("team")).unwrap();
        fs::write(dir.path().join("team/members.json"), "[1, 2, 3]").unwrap();

        let records = loader(&dir).load("team/members").unwrap();
        assert_eq!(records.len(), 3);
    }

    #[test]
    fn test_load_not_found() {
        let dir = TempDir::new().unwrap();
        let err = loader(&dir).load("missing").unwrap_err();

        match err {
            LoadError::NotFound { name, tried } => {
                assert_eq!(name, "missing");
                assert_eq!(tried, vec![dir.path().join("missing.sh"), dir.path().join("missing.json")]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_load_invalid_json_is_not_masked() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("broken.json"), "[{").unwrap();

        let err = loader(&dir).load("broken").unwrap_err();
        assert!(matches!(err, LoadError::Json(..)));
    }

    #[test]
    fn test_load_requires_sequence() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("single.json"), r#"{"slug": "ada"}"#).unwrap();

        let err = loader(&dir).load("single").unwrap_err();
        assert!(matches!(err, LoadError::NotASequence(name) if name == "single"));
    }

    #[test]
    fn test_registry_value_beats_static() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("people.json"), r#"[{"from": "json"}]"#).unwrap();

        let mut registry = SourceRegistry::new();
        registry.insert_value("people", json!([{"from": "registry"}]));

        let records = loader(&dir).with_registry(registry).load("people").unwrap();
        assert_eq!(records, vec![json!({"from": "registry"})]);
    }

    #[test]
    fn test_registry_producer_is_invoked() {
        let dir = TempDir::new().unwrap();
        let mut registry = SourceRegistry::new();
        registry.insert_producer("generated", || {
            Ok(Value::Array((1..=3).map(|i| json!({"n": i})).collect()))
        });

        let records = loader(&dir).with_registry(registry).load("generated").unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[2], json!({"n": 3}));
    }

    #[test]
    fn test_registry_producer_error_is_not_masked() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("people.json"), "[]").unwrap();

        let mut registry = SourceRegistry::new();
        registry.insert_producer("people", || Err("boom".into()));

        let err = loader(&dir).with_registry(registry).load("people").unwrap_err();
        assert!(matches!(err, LoadError::Producer(..)));
    }

    #[cfg(unix)]
    #[test]
    fn test_script_beats_static() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("people.json"), r#"[{"from": "json"}]"#).unwrap();
        fs::write(
            dir.path().join("people.sh"),
            "printf '[{\"from\": \"script\"}]'\n",
        )
        .unwrap();

        let records = loader(&dir).load("people").unwrap();
        assert_eq!(records, vec![json!({"from": "script"})]);
    }

    #[cfg(unix)]
    #[test]
    fn test_script_runs_in_its_directory() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("rows.txt"), "[7]").unwrap();
        fs::write(dir.path().join("rows.sh"), "cat rows.txt\n").unwrap();

        let records = loader(&dir).load("rows").unwrap();
        assert_eq!(records, vec![json!(7)]);
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_script_is_not_masked() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("people.json"), "[]").unwrap();
        fs::write(dir.path().join("people.sh"), "echo nope >&2\nexit 3\n").unwrap();

        let err = loader(&dir).load("people").unwrap_err();
        match err {
            LoadError::Script { stderr, status, .. } => {
                assert_eq!(stderr, "nope");
                assert_eq!(status.code(), Some(3));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_script_in_relative_source_dir() {
        let dir = TempDir::new_in(".").unwrap();
        let relative = Path::new(".").join(dir.path().file_name().unwrap());
        assert!(relative.is_relative());
        fs::write(relative.join("people.json"), r#"[{"from": "json"}]"#).unwrap();
        fs::write(relative.join("people.sh"), "printf '[{\"from\": \"script\"}]'\n").unwrap();

        let records = DataLoader::new(&relative, LoaderConfig::default()).load("people").unwrap();
        assert_eq!(records, vec![json!({"from": "script"})]);
    }

    #[cfg(unix)]
    #[test]
    fn test_script_with_invalid_output() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("people.sh"), "echo not json\n").unwrap();

        let err = loader(&dir).load("people").unwrap_err();
        assert!(matches!(err, LoadError::Json(..)));
    }
}
