//! Asset resolution configuration.
//!
//! # Module Structure
//!
//! ```text
//! config/
//! ├── defaults   # Documented default for every recognized path
//! └── mod.rs     # AssetResolutionConfig (this file)
//! ```
//!
//! # Recognized paths
//!
//! | Path                        | Default                               |
//! |-----------------------------|---------------------------------------|
//! | `plugin`                    | disabled                              |
//! | `baseDirectory`             | `plugins`                             |
//! | `build.outDirectory`        | `build` (`false` means web root)      |
//! | `build.manifest`            | `webroot/manifest.json`               |
//! | `development.url`           | `http://localhost:3000`               |
//! | `development.scriptEntries` | empty                                 |
//! | `development.styleEntries`  | empty                                 |
//! | `development.hostNeedles`   | `[".test", ".local", "localhost", "127.0.0.1"]` |
//! | `forceProductionMode`       | `false`                               |
//! | `productionHint`            | `vprod`                               |
//! | `viewBlocks.css`            | `css`                                 |
//! | `viewBlocks.script`         | `script`                              |

pub mod defaults;

use crate::error::ConfigError;
use crate::log;
use serde_json::{Map, Value};
use std::{
    fs,
    path::{Path, PathBuf},
    sync::Once,
};

/// Top-level keys this crate interprets. Anything else in the config file is
/// reported once at load time, like a typo'd section would be.
const RECOGNIZED_KEYS: [&str; 7] = [
    "plugin",
    "baseDirectory",
    "build",
    "development",
    "forceProductionMode",
    "productionHint",
    "viewBlocks",
];

static HOST_NEEDLE_WARNING: Once = Once::new();

// ============================================================================
// OutDir
// ============================================================================

/// Resolved output directory for built assets.
///
/// `Disabled` means assets are published at the web root and URLs carry no
/// directory prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutDir {
    Disabled,
    Dir(String),
}

impl OutDir {
    /// Build from a raw config value, trimming leading/trailing separators.
    /// An empty or all-separator string collapses to `Disabled`.
    pub fn new(raw: &str) -> Self {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            Self::Disabled
        } else {
            Self::Dir(trimmed.to_string())
        }
    }

    /// URL prefix without leading or trailing separator (empty if disabled).
    pub fn prefix(&self) -> &str {
        match self {
            Self::Disabled => "",
            Self::Dir(dir) => dir,
        }
    }

    pub fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }
}

// ============================================================================
// AssetResolutionConfig
// ============================================================================

/// Read-only, path-addressable configuration value.
///
/// Constructed once per render context (or reused as a static default) and
/// handed to the manifest reader and the tag planner. `merge` produces a
/// per-call override without mutating the base.
#[derive(Debug, Clone, Default)]
pub struct AssetResolutionConfig {
    doc: Map<String, Value>,
}

impl AssetResolutionConfig {
    /// Wrap an already-built configuration document.
    pub fn new(doc: Map<String, Value>) -> Self {
        Self { doc }
    }

    /// Build from a JSON value; the top level must be an object.
    pub fn from_value(value: Value) -> Result<Self, ConfigError> {
        match value {
            Value::Object(doc) => Ok(Self { doc }),
            other => Err(ConfigError::Invalid(format!(
                "configuration must be an object, got {}",
                json_type_name(&other)
            ))),
        }
    }

    /// Parse a TOML configuration document.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let raw: toml::Value = toml::from_str(content)?;
        let value = serde_json::to_value(raw)
            .map_err(|e| ConfigError::Invalid(format!("config is not representable: {e}")))?;
        Self::from_value(value)
    }

    /// Load configuration from a TOML file, warning on unrecognized
    /// top-level keys.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        let config = Self::from_toml_str(&content)?;

        let unknown = config.unknown_keys();
        if !unknown.is_empty() {
            log!("warning"; "unknown keys in {}:", path.display());
            for key in &unknown {
                eprintln!("- {key}");
            }
        }

        Ok(config)
    }

    /// Top-level keys present in the document but not interpreted by this
    /// crate.
    pub fn unknown_keys(&self) -> Vec<String> {
        self.doc
            .keys()
            .filter(|k| !RECOGNIZED_KEYS.contains(&k.as_str()))
            .cloned()
            .collect()
    }

    // ========================================================================
    // generic access
    // ========================================================================

    /// Dotted-path traversal (e.g. `"build.outDirectory"`).
    ///
    /// Returns `None` if any segment is missing or a non-leaf segment is not
    /// an object.
    pub fn read(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split('.');
        let mut current = self.doc.get(segments.next()?)?;
        for segment in segments {
            current = current.as_object()?.get(segment)?;
        }
        Some(current)
    }

    /// Read a string value, falling back to `default` when absent or not a
    /// string.
    pub fn read_str<'a>(&'a self, path: &str, default: &'a str) -> &'a str {
        match self.read(path) {
            Some(Value::String(s)) => s,
            _ => default,
        }
    }

    /// Read a boolean value, falling back to `default` when absent or not a
    /// boolean.
    pub fn read_bool(&self, path: &str, default: bool) -> bool {
        self.read(path).and_then(Value::as_bool).unwrap_or(default)
    }

    /// Shallow merge: top-level keys of `other` override same-named keys of
    /// the receiver. A nested object under a shared key is fully replaced,
    /// not deep-merged.
    pub fn merge(&self, other: &Self) -> Self {
        let mut doc = self.doc.clone();
        for (key, value) in &other.doc {
            doc.insert(key.clone(), value.clone());
        }
        Self { doc }
    }

    // ========================================================================
    // typed accessors
    // ========================================================================

    /// Plugin namespace, `None` when disabled (absent, `false`, or empty).
    pub fn plugin(&self) -> Option<&str> {
        match self.read("plugin") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        }
    }

    /// Root directory for plugin-namespaced packages.
    pub fn base_directory(&self) -> &str {
        self.read_str("baseDirectory", defaults::BASE_DIRECTORY)
    }

    /// Output directory for built assets. `false`/`null` means assets live
    /// at the web root.
    pub fn out_directory(&self) -> OutDir {
        match self.read("build.outDirectory") {
            None => OutDir::new(defaults::BUILD_OUT_DIRECTORY),
            Some(Value::Bool(false)) | Some(Value::Null) => OutDir::Disabled,
            Some(Value::String(s)) => OutDir::new(s),
            Some(_) => OutDir::new(defaults::BUILD_OUT_DIRECTORY),
        }
    }

    /// Output directory with the plugin namespace folded in as a leading
    /// path segment. This is the value records join their file paths onto.
    pub fn url_base(&self) -> OutDir {
        let out = self.out_directory();
        match self.plugin() {
            None => out,
            Some(plugin) => match out {
                OutDir::Disabled => OutDir::new(plugin),
                OutDir::Dir(dir) => OutDir::new(&format!("{plugin}/{dir}")),
            },
        }
    }

    /// Resolved manifest location. An explicit `build.manifest` always wins;
    /// with a plugin namespace the default is derived under the plugin root.
    pub fn manifest_path(&self) -> PathBuf {
        if let Some(Value::String(s)) = self.read("build.manifest") {
            return PathBuf::from(s);
        }
        if let Some(plugin) = self.plugin() {
            return Path::new(self.base_directory())
                .join(plugin)
                .join("webroot")
                .join("manifest.json");
        }
        PathBuf::from(defaults::BUILD_MANIFEST)
    }

    /// Dev-server origin, validated and trimmed of any trailing separator.
    pub fn development_url(&self) -> Result<String, ConfigError> {
        let raw = self.read_str("development.url", defaults::DEVELOPMENT_URL);
        let parsed = url::Url::parse(raw).map_err(|e| {
            ConfigError::Invalid(format!("`development.url` is not a valid URL: {e}"))
        })?;
        Ok(parsed.as_str().trim_end_matches('/').to_string())
    }

    /// Script entry files served directly from source during development.
    pub fn script_entries(&self) -> Result<Vec<String>, ConfigError> {
        self.entry_list("development.scriptEntries")
    }

    /// Style entry files served directly from source during development.
    pub fn style_entries(&self) -> Result<Vec<String>, ConfigError> {
        self.entry_list("development.styleEntries")
    }

    fn entry_list(&self, path: &str) -> Result<Vec<String>, ConfigError> {
        match self.read(path) {
            None | Some(Value::Null) => Ok(Vec::new()),
            Some(Value::Array(items)) => items
                .iter()
                .map(|item| {
                    item.as_str().map(str::to_string).ok_or_else(|| {
                        ConfigError::Invalid(format!("`{path}` entries must be strings"))
                    })
                })
                .collect(),
            Some(Value::Object(_)) => Err(ConfigError::Invalid(format!(
                "`{path}` is a keyed mapping; expected an ordered list"
            ))),
            Some(other) => Err(ConfigError::Invalid(format!(
                "`{path}` must be a list of strings, got {}",
                json_type_name(other)
            ))),
        }
    }

    /// Substrings identifying a development host.
    ///
    /// The deprecated singular `development.hostNeedle` is normalized into
    /// the list form with a one-time warning.
    pub fn development_host_needles(&self) -> Vec<String> {
        if let Some(Value::Array(items)) = self.read("development.hostNeedles") {
            return items
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect();
        }
        if let Some(Value::String(needle)) = self.read("development.hostNeedle") {
            HOST_NEEDLE_WARNING.call_once(|| {
                log!("warning"; "`development.hostNeedle` is deprecated, use the `development.hostNeedles` list");
            });
            return vec![needle.clone()];
        }
        defaults::DEVELOPMENT_HOST_NEEDLES
            .iter()
            .map(|s| (*s).to_string())
            .collect()
    }

    /// Override to always resolve production URLs.
    pub fn force_production_mode(&self) -> bool {
        self.read_bool("forceProductionMode", defaults::FORCE_PRODUCTION_MODE)
    }

    /// Cookie/query-parameter name that forces production mode when present.
    pub fn production_hint(&self) -> &str {
        self.read_str("productionHint", defaults::PRODUCTION_HINT)
    }

    /// Named output region for stylesheet tags.
    pub fn css_block(&self) -> &str {
        self.read_str("viewBlocks.css", defaults::VIEW_BLOCK_CSS)
    }

    /// Named output region for script tags.
    pub fn script_block(&self) -> &str {
        self.read_str("viewBlocks.script", defaults::VIEW_BLOCK_SCRIPT)
    }
}

/// JSON type name for error messages.
pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

// ============================================================================
// tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn config(value: Value) -> AssetResolutionConfig {
        AssetResolutionConfig::from_value(value).unwrap()
    }

    #[test]
    fn test_read_dotted_path() {
        let config = config(json!({"build": {"outDirectory": "assets"}}));
        assert_eq!(
            config.read("build.outDirectory"),
            Some(&json!("assets"))
        );
        assert_eq!(config.read("build.missing"), None);
        assert_eq!(config.read("missing.outDirectory"), None);
    }

    #[test]
    fn test_read_through_non_object_segment() {
        let config = config(json!({"build": "flat"}));
        assert_eq!(config.read("build.outDirectory"), None);
    }

    #[test]
    fn test_defaults() {
        let config = AssetResolutionConfig::default();
        assert_eq!(config.plugin(), None);
        assert_eq!(config.out_directory(), OutDir::Dir("build".into()));
        assert_eq!(config.manifest_path(), PathBuf::from("webroot/manifest.json"));
        assert_eq!(config.development_url().unwrap(), "http://localhost:3000");
        assert!(!config.force_production_mode());
        assert_eq!(config.production_hint(), "vprod");
        assert_eq!(config.css_block(), "css");
        assert_eq!(config.script_block(), "script");
        assert_eq!(
            config.development_host_needles(),
            vec![".test", ".local", "localhost", "127.0.0.1"]
        );
    }

    #[test]
    fn test_merge_is_shallow() {
        let base = config(json!({
            "plugin": false,
            "build": {"outDirectory": "build", "manifest": "webroot/manifest.json"}
        }));
        let overrides = config(json!({
            "plugin": "admin",
            "build": {"outDirectory": "dist"}
        }));

        let merged = base.merge(&overrides);
        assert_eq!(merged.plugin(), Some("admin"));
        assert_eq!(merged.out_directory(), OutDir::Dir("dist".into()));
        // Shared nested key is fully replaced, not deep-merged
        assert_eq!(merged.read("build.manifest"), None);
        // Base is untouched
        assert_eq!(base.plugin(), None);
    }

    #[test]
    fn test_out_directory_disabled() {
        let config = config(json!({"build": {"outDirectory": false}}));
        assert_eq!(config.out_directory(), OutDir::Disabled);

        let config = super::AssetResolutionConfig::from_value(json!({
            "build": {"outDirectory": null}
        }))
        .unwrap();
        assert_eq!(config.out_directory(), OutDir::Disabled);
    }

    #[test]
    fn test_out_directory_trims_separators() {
        let config = config(json!({"build": {"outDirectory": "/build/"}}));
        assert_eq!(config.out_directory(), OutDir::Dir("build".into()));

        let config = super::AssetResolutionConfig::from_value(json!({
            "build": {"outDirectory": "//"}
        }))
        .unwrap();
        assert_eq!(config.out_directory(), OutDir::Disabled);
    }

    #[test]
    fn test_url_base_with_plugin() {
        let config = config(json!({"plugin": "admin", "build": {"outDirectory": "build"}}));
        assert_eq!(config.url_base(), OutDir::Dir("admin/build".into()));

        let config = super::AssetResolutionConfig::from_value(json!({
            "plugin": "admin",
            "build": {"outDirectory": false}
        }))
        .unwrap();
        assert_eq!(config.url_base(), OutDir::Dir("admin".into()));
    }

    #[test]
    fn test_manifest_path_plugin_default() {
        let config = config(json!({"plugin": "admin"}));
        assert_eq!(
            config.manifest_path(),
            Path::new("plugins").join("admin").join("webroot").join("manifest.json")
        );
    }

    #[test]
    fn test_manifest_path_explicit_wins() {
        let config = config(json!({
            "plugin": "admin",
            "build": {"manifest": "custom/manifest.json"}
        }));
        assert_eq!(config.manifest_path(), PathBuf::from("custom/manifest.json"));
    }

    #[test]
    fn test_entry_list_rejects_keyed_mapping() {
        let config = config(json!({
            "development": {"scriptEntries": {"main": "src/main.js"}}
        }));
        let err = config.script_entries().unwrap_err();
        assert!(format!("{err}").contains("keyed mapping"));
    }

    #[test]
    fn test_entry_list_rejects_non_string_items() {
        let config = config(json!({"development": {"scriptEntries": [1, 2]}}));
        assert!(config.script_entries().is_err());
    }

    #[test]
    fn test_entry_list_defaults_empty() {
        let config = AssetResolutionConfig::default();
        assert!(config.script_entries().unwrap().is_empty());
        assert!(config.style_entries().unwrap().is_empty());
    }

    #[test]
    fn test_deprecated_host_needle_normalized() {
        let config = config(json!({"development": {"hostNeedle": ".dev"}}));
        assert_eq!(config.development_host_needles(), vec![".dev"]);
    }

    #[test]
    fn test_host_needles_list_wins_over_singular() {
        let config = config(json!({
            "development": {"hostNeedle": ".dev", "hostNeedles": [".test"]}
        }));
        assert_eq!(config.development_host_needles(), vec![".test"]);
    }

    #[test]
    fn test_development_url_invalid() {
        let config = config(json!({"development": {"url": "not a url"}}));
        assert!(config.development_url().is_err());
    }

    #[test]
    fn test_from_toml_str() {
        let config = AssetResolutionConfig::from_toml_str(
            "forceProductionMode = true\n\n[build]\noutDirectory = \"dist\"\n",
        )
        .unwrap();
        assert!(config.force_production_mode());
        assert_eq!(config.out_directory(), OutDir::Dir("dist".into()));
    }

    #[test]
    fn test_from_toml_str_invalid() {
        assert!(AssetResolutionConfig::from_toml_str("[build\noutDirectory = 1").is_err());
    }

    #[test]
    fn test_unknown_keys() {
        let config = config(json!({"plugin": "admin", "unknownSection": {}}));
        assert_eq!(config.unknown_keys(), vec!["unknownSection"]);
    }

    #[test]
    fn test_from_value_rejects_non_object() {
        assert!(AssetResolutionConfig::from_value(json!([1, 2])).is_err());
    }
}
