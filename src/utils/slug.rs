//! URL slugification.
//!
//! Turns arbitrary record values into tokens that are safe to use as a
//! single path segment in an output filename.

/// Convert text to a lowercase, hyphen-separated slug.
///
/// Non-ASCII text is transliterated first, then every run of characters
/// outside `[a-z0-9]` collapses into one `-`. Leading and trailing
/// separators are dropped, so `slugify(slugify(x)) == slugify(x)`.
///
/// | Input | Output |
/// |-------|--------|
/// | `Ada Lovelace` | `ada-lovelace` |
/// | `  C++ / Rust!` | `c-rust` |
/// | `Ærøskøbing` | `aeroskobing` |
pub fn slugify(text: &str) -> String {
    slug::slugify(text)
}
