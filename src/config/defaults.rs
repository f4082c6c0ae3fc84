//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

pub fn r#true() -> bool {
    true
}

pub fn r#false() -> bool {
    false
}

// ============================================================================
// [json_files] Section Defaults
// ============================================================================

pub mod json_files {
    /// Directive keys stripped from every generated entry.
    pub fn properties_to_remove() -> Vec<String> {
        vec![
            "source_file".into(),
            "filename_pattern".into(),
            "as_permalink".into(),
        ]
    }
}

// ============================================================================
// [loader] Section Defaults
// ============================================================================

pub mod loader {
    pub fn script_extension() -> String {
        "sh".into()
    }

    pub fn interpreter() -> Vec<String> {
        vec!["sh".into()]
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn content() -> PathBuf {
        "content".into()
    }

    pub fn output() -> PathBuf {
        "public".into()
    }
}
