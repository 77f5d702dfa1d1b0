//! A single immutable view over one manifest chunk.

use crate::config::OutDir;
use serde_json::{Map, Value};

/// One (key, chunk) pair from the bundler manifest, plus the resolved output
/// directory and a metadata mapping for per-render HTML attributes.
///
/// Classification answers questions about this one asset without knowledge
/// of sibling records. Absence of an optional chunk field is a negative or
/// empty answer, never an error: callers probe arbitrary chunks without
/// prior existence checks.
#[derive(Debug, Clone)]
pub struct ManifestRecord {
    key: String,
    file: String,
    chunk: Map<String, Value>,
    out_dir: OutDir,
    metadata: Map<String, Value>,
}

impl ManifestRecord {
    /// Build a record from a parsed chunk. Returns `None` when the chunk has
    /// no usable `file` field (the reader turns that into an explicit error).
    pub fn new(key: String, chunk: Map<String, Value>, out_dir: OutDir) -> Option<Self> {
        let file = chunk.get("file")?.as_str()?.to_string();
        Some(Self {
            key,
            file,
            chunk,
            out_dir,
            metadata: Map::new(),
        })
    }

    /// The manifest entry's identifying key, frequently the original
    /// source-relative path.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// The chunk's output path, relative to the output directory.
    pub fn file(&self) -> &str {
        &self.file
    }

    /// Direct chunk field access for fields the crate does not special-case
    /// (`imports`, `dynamicImports`, ...).
    pub fn raw_field(&self, name: &str) -> Option<&Value> {
        self.chunk.get(name)
    }

    // ========================================================================
    // classification
    // ========================================================================

    /// True iff the chunk's `isEntry` field is present and truthy.
    pub fn is_entry(&self) -> bool {
        self.chunk
            .get("isEntry")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// True iff the output file name contains `legacy`.
    pub fn is_legacy(&self) -> bool {
        self.file.contains("legacy")
    }

    /// True iff the output file name contains `polyfills`.
    pub fn is_polyfill(&self) -> bool {
        self.file.contains("polyfills")
    }

    /// True iff the output file is a script.
    pub fn is_javascript(&self) -> bool {
        self.file.ends_with(".js")
    }

    /// True iff the output file is a stylesheet.
    pub fn is_stylesheet(&self) -> bool {
        self.file.ends_with(".css")
    }

    /// True iff the named field is a string containing `needle`.
    pub fn matches_field(&self, needle: &str, field: &str) -> bool {
        match self.chunk.get(field) {
            Some(Value::String(s)) => s.contains(needle),
            _ => false,
        }
    }

    /// `matches_field` against the `src` field.
    pub fn matches(&self, needle: &str) -> bool {
        self.matches_field(needle, "src")
    }

    /// True iff at least one needle matches. An empty list matches nothing.
    pub fn matches_any<S: AsRef<str>>(&self, needles: &[S], field: &str) -> bool {
        needles
            .iter()
            .any(|needle| self.matches_field(needle.as_ref(), field))
    }

    /// True iff every needle matches. Vacuously true for an empty list.
    pub fn matches_all<S: AsRef<str>>(&self, needles: &[S], field: &str) -> bool {
        needles
            .iter()
            .all(|needle| self.matches_field(needle.as_ref(), field))
    }

    /// An entry point that should land in the script block.
    pub fn is_entry_script(&self) -> bool {
        self.is_entry() && self.is_javascript()
    }

    /// A modern ES-module entry, as opposed to a legacy/nomodule or polyfill
    /// bundle. Callers use this to choose between `type="module"` and
    /// `nomodule`.
    pub fn is_module_entry_script(&self) -> bool {
        self.is_entry_script() && !self.is_legacy() && !self.is_polyfill()
    }

    // ========================================================================
    // URL derivation
    // ========================================================================

    /// Public URL path for the record's primary file.
    ///
    /// Always a single leading separator and no doubled separators, for any
    /// output directory value including the disabled sentinel.
    pub fn file_url(&self) -> String {
        self.join_url(&self.file)
    }

    /// Public URL paths for every CSS dependency of this chunk. Empty when
    /// the `css` field is absent or empty.
    pub fn css_urls(&self) -> Vec<String> {
        match self.chunk.get("css") {
            Some(Value::Array(items)) => items
                .iter()
                .filter_map(Value::as_str)
                .map(|path| self.join_url(path))
                .collect(),
            _ => Vec::new(),
        }
    }

    fn join_url(&self, path: &str) -> String {
        let path = path.trim_start_matches('/');
        let base = self.out_dir.prefix();
        if base.is_empty() {
            format!("/{path}")
        } else {
            format!("/{base}/{path}")
        }
    }

    // ========================================================================
    // metadata
    // ========================================================================

    /// The full metadata mapping.
    pub fn metadata(&self) -> &Map<String, Value> {
        &self.metadata
    }

    /// One metadata value, `None` when the key was never attached.
    pub fn metadata_value(&self, key: &str) -> Option<&Value> {
        self.metadata.get(key)
    }

    /// Replace the metadata mapping.
    pub fn set_metadata(&mut self, metadata: Map<String, Value>) {
        self.metadata = metadata;
    }

    /// Upsert one metadata entry.
    pub fn add_metadata(&mut self, key: impl Into<String>, value: Value) {
        self.metadata.insert(key.into(), value);
    }
}

// ============================================================================
// tests
// ============================================================================
