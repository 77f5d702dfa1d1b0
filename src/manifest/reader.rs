//! Manifest file reading and canonical ordering.

use super::{ManifestRecord, ManifestRecords};
use crate::config::{AssetResolutionConfig, OutDir};
use crate::error::ManifestError;
use serde_json::Value;
use std::{fs, path::PathBuf};

/// Turns the raw manifest document at a configured location into an ordered
/// [`ManifestRecords`].
///
/// The read is request-scoped and fallible: no caching, no retry, no
/// fallback to an empty collection. A missing or corrupt manifest fails the
/// current render.
#[derive(Debug, Clone)]
pub struct ManifestReader {
    manifest_path: PathBuf,
    out_dir: OutDir,
}

impl ManifestReader {
    pub fn new(manifest_path: impl Into<PathBuf>, out_dir: OutDir) -> Self {
        Self {
            manifest_path: manifest_path.into(),
            out_dir,
        }
    }

    /// Resolve the manifest path and output directory from a configuration
    /// value (explicit `build.manifest`, or the plugin-derived default).
    pub fn from_config(config: &AssetResolutionConfig) -> Self {
        Self::new(config.manifest_path(), config.url_base())
    }

    /// Read, parse, and canonically order the manifest.
    pub fn read(&self) -> Result<ManifestRecords, ManifestError> {
        let raw = fs::read_to_string(&self.manifest_path).map_err(|source| {
            ManifestError::NotFound {
                path: self.manifest_path.clone(),
                source,
            }
        })?;

        // Some bundler edge cases leave embedded NULs in string fields
        let raw = raw.replace('\u{0}', "");

        let document: Value =
            serde_json::from_str(&raw).map_err(|source| ManifestError::Unparsable {
                path: self.manifest_path.clone(),
                source,
            })?;
        let Value::Object(entries) = document else {
            return Err(ManifestError::NotAnObject {
                path: self.manifest_path.clone(),
            });
        };

        let mut records = Vec::with_capacity(entries.len());
        for (key, value) in entries {
            let Value::Object(chunk) = value else {
                return Err(ManifestError::MalformedChunk {
                    path: self.manifest_path.clone(),
                    key,
                });
            };
            let record = ManifestRecord::new(key.clone(), chunk, self.out_dir.clone())
                .ok_or_else(|| ManifestError::MissingFile {
                    path: self.manifest_path.clone(),
                    key,
                })?;
            records.push(record);
        }

        Ok(ManifestRecords::new(
            canonical_order(records),
            self.manifest_path.clone(),
        ))
    }
}

/// Canonical two-pass stable reorder.
///
/// Polyfill records first, then legacy records, then everything else, each
/// group internally in original manifest order. Browser-loaded script tags
/// emitted in collection order then satisfy legacy loading constraints:
/// polyfills before legacy code, legacy/nomodule before ES-module code.
fn canonical_order(records: Vec<ManifestRecord>) -> Vec<ManifestRecord> {
    // Pass 1: polyfills move before all others
    let (polyfills, rest): (Vec<_>, Vec<_>) =
        records.into_iter().partition(ManifestRecord::is_polyfill);
    let mut ordered = polyfills;
    ordered.extend(rest);

    // Pass 2: modern (non-polyfill, non-legacy) records move after all others
    let (modern, rest): (Vec<_>, Vec<_>) = ordered
        .into_iter()
        .partition(|r| !r.is_polyfill() && !r.is_legacy());
    let mut ordered = rest;
    ordered.extend(modern);
    ordered
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    fn write_manifest(content: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(content.as_bytes()).unwrap();
        (dir, path)
    }

    fn keys(records: &ManifestRecords) -> Vec<&str> {
        records.iter().map(ManifestRecord::key).collect()
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("manifest.json");
        let err = ManifestReader::new(&path, OutDir::Disabled).read().unwrap_err();

        assert!(matches!(err, ManifestError::NotFound { .. }));
        assert!(format!("{err}").contains(&path.display().to_string()));
    }

    #[test]
    fn test_invalid_json_is_unparsable() {
        let (_dir, path) = write_manifest("{not json");
        let err = ManifestReader::new(&path, OutDir::Disabled).read().unwrap_err();
        assert!(matches!(err, ManifestError::Unparsable { .. }));
    }

    #[test]
    fn test_top_level_array_rejected() {
        let (_dir, path) = write_manifest("[]");
        let err = ManifestReader::new(&path, OutDir::Disabled).read().unwrap_err();
        assert!(matches!(err, ManifestError::NotAnObject { .. }));
    }

    #[test]
    fn test_chunk_without_file_rejected() {
        let (_dir, path) = write_manifest(r#"{"main.js": {"isEntry": true}}"#);
        let err = ManifestReader::new(&path, OutDir::Disabled).read().unwrap_err();
        assert!(matches!(err, ManifestError::MissingFile { .. }));
    }

    #[test]
    fn test_non_object_chunk_rejected() {
        let (_dir, path) = write_manifest(r#"{"main.js": "assets/main.js"}"#);
        let err = ManifestReader::new(&path, OutDir::Disabled).read().unwrap_err();
        assert!(matches!(err, ManifestError::MalformedChunk { .. }));
    }

    #[test]
    fn test_nul_characters_stripped() {
        let (_dir, path) =
            write_manifest("{\"main.js\": {\"file\": \"assets/main\u{0}.js\"}}");
        let records = ManifestReader::new(&path, OutDir::Disabled).read().unwrap();
        assert_eq!(records.iter().next().unwrap().file(), "assets/main.js");
    }

    #[test]
    fn test_reads_in_declaration_order() {
        let (_dir, path) = write_manifest(
            r#"{
                "z.js": {"file": "assets/z.js"},
                "a.js": {"file": "assets/a.js"},
                "m.js": {"file": "assets/m.js"}
            }"#,
        );
        let records = ManifestReader::new(&path, OutDir::Disabled).read().unwrap();
        assert_eq!(keys(&records), ["z.js", "a.js", "m.js"]);
    }

    #[test]
    fn test_canonical_order_polyfill_legacy_modern() {
        // Arbitrary input order: modern, legacy, polyfill
        let (_dir, path) = write_manifest(
            r#"{
                "main.js": {"file": "assets/main.abc.js", "isEntry": true},
                "main-legacy.js": {"file": "assets/main-legacy.def.js", "isEntry": true},
                "polyfills-legacy.js": {"file": "assets/polyfills-legacy.ghi.js", "isEntry": true}
            }"#,
        );
        let records = ManifestReader::new(&path, OutDir::Disabled).read().unwrap();
        assert_eq!(
            keys(&records),
            ["polyfills-legacy.js", "main-legacy.js", "main.js"]
        );
    }

    #[test]
    fn test_canonical_order_stable_within_groups() {
        let (_dir, path) = write_manifest(
            r#"{
                "b.js": {"file": "assets/b.js"},
                "a-legacy.js": {"file": "assets/a-legacy.js"},
                "a.js": {"file": "assets/a.js"},
                "b-legacy.js": {"file": "assets/b-legacy.js"}
            }"#,
        );
        let records = ManifestReader::new(&path, OutDir::Disabled).read().unwrap();
        assert_eq!(keys(&records), ["a-legacy.js", "b-legacy.js", "b.js", "a.js"]);
    }

    #[test]
    fn test_canonical_order_idempotent() {
        let (_dir, path) = write_manifest(
            r#"{
                "main.js": {"file": "assets/main.js"},
                "polyfills-legacy.js": {"file": "assets/polyfills-legacy.js"},
                "main-legacy.js": {"file": "assets/main-legacy.js"}
            }"#,
        );
        let once = ManifestReader::new(&path, OutDir::Disabled).read().unwrap();
        let twice = ManifestRecords::new(
            canonical_order(once.iter().cloned().collect()),
            once.manifest_path(),
        );
        assert_eq!(keys(&once), keys(&twice));
    }

    #[test]
    fn test_from_config_resolves_paths() {
        let config = AssetResolutionConfig::from_value(json!({
            "plugin": "admin",
            "build": {"outDirectory": "build"}
        }))
        .unwrap();
        let reader = ManifestReader::from_config(&config);
        assert_eq!(
            reader.manifest_path,
            std::path::Path::new("plugins")
                .join("admin")
                .join("webroot")
                .join("manifest.json")
        );
        assert_eq!(reader.out_dir, OutDir::Dir("admin/build".into()));
    }

    #[test]
    fn test_records_carry_out_dir() {
        let (_dir, path) = write_manifest(r#"{"main.js": {"file": "assets/main.js"}}"#);
        let records = ManifestReader::new(&path, OutDir::new("build")).read().unwrap();
        assert_eq!(records.iter().next().unwrap().file_url(), "/build/assets/main.js");
    }
}
