//! Ordered collection of manifest records.

use super::ManifestRecord;
use crate::error::InvalidFilterError;
use crate::config::json_type_name;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// An ordered sequence of [`ManifestRecord`] tagged with the manifest file
/// they came from.
///
/// Order is significant: the reader's canonical reordering guarantees that
/// emitting tags in collection order satisfies legacy-bundle loading
/// constraints. Filtering preserves the relative order of surviving records.
#[derive(Debug, Clone)]
pub struct ManifestRecords {
    records: Vec<ManifestRecord>,
    manifest_path: PathBuf,
}

impl ManifestRecords {
    pub fn new(records: Vec<ManifestRecord>, manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            records,
            manifest_path: manifest_path.into(),
        }
    }

    /// Path of the manifest file these records come from.
    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterate records in stored order.
    pub fn iter(&self) -> std::slice::Iter<'_, ManifestRecord> {
        self.records.iter()
    }

    /// Mutable iteration, used by the render layer to attach metadata before
    /// first read.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, ManifestRecord> {
        self.records.iter_mut()
    }

    /// New collection keeping only records for which `predicate` holds,
    /// preserving relative order.
    pub fn filter(&self, predicate: impl Fn(&ManifestRecord) -> bool) -> Self {
        Self {
            records: self
                .records
                .iter()
                .filter(|record| predicate(record))
                .cloned()
                .collect(),
            manifest_path: self.manifest_path.clone(),
        }
    }

    /// New collection keeping records selected by a caller-supplied
    /// [`Filter`] value.
    pub fn select(&self, filter: &Filter) -> Self {
        self.filter(|record| filter.accepts(record))
    }
}

impl<'a> IntoIterator for &'a ManifestRecords {
    type Item = &'a ManifestRecord;
    type IntoIter = std::slice::Iter<'a, ManifestRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}

// ============================================================================
// Filter
// ============================================================================

/// Record selection vocabulary used by the rendering layer.
///
/// A single needle or a list of needles, matched as substrings of the
/// record's `src` field. Dynamic values of any other shape are rejected with
/// [`InvalidFilterError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Needle(String),
    Needles(Vec<String>),
}

impl Filter {
    /// Build a filter from a dynamic JSON value.
    pub fn from_value(value: &Value) -> Result<Self, InvalidFilterError> {
        match value {
            Value::String(needle) => Ok(Self::Needle(needle.clone())),
            Value::Array(items) => {
                let needles = items
                    .iter()
                    .map(|item| {
                        item.as_str().map(str::to_string).ok_or(InvalidFilterError {
                            found: json_type_name(item),
                        })
                    })
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Self::Needles(needles))
            }
            other => Err(InvalidFilterError {
                found: json_type_name(other),
            }),
        }
    }

    /// Whether the record is selected by this filter.
    pub fn accepts(&self, record: &ManifestRecord) -> bool {
        match self {
            Self::Needle(needle) => record.matches(needle),
            Self::Needles(needles) => record.matches_any(needles, "src"),
        }
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutDir;
    use serde_json::json;

    fn collection() -> ManifestRecords {
        let records = [
            ("main.js", "assets/main.abc.js", "src/main.js"),
            ("admin.js", "assets/admin.def.js", "src/admin.js"),
            ("shared.js", "assets/shared.ghi.js", "src/shared.js"),
        ]
        .into_iter()
        .map(|(key, file, src)| {
            let Value::Object(chunk) = json!({"file": file, "src": src}) else {
                unreachable!()
            };
            ManifestRecord::new(key.into(), chunk, OutDir::new("build")).unwrap()
        })
        .collect();
        ManifestRecords::new(records, "webroot/manifest.json")
    }

    #[test]
    fn test_manifest_path() {
        assert_eq!(
            collection().manifest_path(),
            Path::new("webroot/manifest.json")
        );
    }

    #[test]
    fn test_filter_preserves_order_and_path() {
        let filtered = collection().filter(|r| !r.matches("admin"));
        let keys: Vec<_> = filtered.iter().map(ManifestRecord::key).collect();
        assert_eq!(keys, ["main.js", "shared.js"]);
        assert_eq!(filtered.manifest_path(), Path::new("webroot/manifest.json"));
    }

    #[test]
    fn test_select_with_needle() {
        let filter = Filter::from_value(&json!("admin")).unwrap();
        let selected = collection().select(&filter);
        assert_eq!(selected.len(), 1);
        assert_eq!(selected.iter().next().unwrap().key(), "admin.js");
    }

    #[test]
    fn test_select_with_needle_list() {
        let filter = Filter::from_value(&json!(["main", "shared"])).unwrap();
        let selected = collection().select(&filter);
        assert_eq!(selected.len(), 2);
    }

    #[test]
    fn test_filter_from_invalid_value() {
        let err = Filter::from_value(&json!(42)).unwrap_err();
        assert_eq!(err.found, "number");

        let err = Filter::from_value(&json!({"needle": "main"})).unwrap_err();
        assert_eq!(err.found, "object");

        // A list with non-string items is rejected too
        let err = Filter::from_value(&json!(["main", 1])).unwrap_err();
        assert_eq!(err.found, "number");
    }

    #[test]
    fn test_iteration_in_stored_order() {
        let collection = collection();
        let keys: Vec<_> = collection.iter().map(ManifestRecord::key).collect();
        assert_eq!(keys, ["main.js", "admin.js", "shared.js"]);
    }
}
