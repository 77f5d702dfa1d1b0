//! Tag planning: turns records and config into (url, kind, attributes)
//! declarations.
//!
//! The crate never formats HTML. Declarations are handed to an external
//! [`MarkupEmitter`] which owns the actual `<script>`/`<link>` markup.

use crate::config::AssetResolutionConfig;
use crate::error::ConfigError;
use crate::manifest::ManifestRecords;
use serde::Serialize;
use serde_json::{Map, Value, json};

/// What kind of tag an asset declaration resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Script,
    Style,
}

/// One planned asset declaration: a URL, a tag kind, an attribute mapping,
/// and the named view block it belongs to.
///
/// Serializable so host integrations can pass declarations across process
/// or template boundaries without this crate knowing about them.
#[derive(Debug, Clone, Serialize)]
pub struct AssetTag {
    pub kind: AssetKind,
    pub url: String,
    pub attributes: Map<String, Value>,
    pub block: String,
}

/// Seam to the external HTML renderer. Implementations receive a declaration
/// and return markup; this crate supplies the pairs, never the strings.
pub trait MarkupEmitter {
    fn emit(&self, tag: &AssetTag) -> String;
}

/// Render a declaration list through an emitter, one tag per line.
pub fn render_with(emitter: &impl MarkupEmitter, tags: &[AssetTag]) -> String {
    tags.iter()
        .map(|tag| emitter.emit(tag))
        .collect::<Vec<_>>()
        .join("\n")
}

// ============================================================================
// TagPlanner
// ============================================================================

/// Plans asset declarations for one render, in either environment.
#[derive(Debug, Clone, Copy)]
pub struct TagPlanner<'a> {
    config: &'a AssetResolutionConfig,
}

impl<'a> TagPlanner<'a> {
    pub fn new(config: &'a AssetResolutionConfig) -> Self {
        Self { config }
    }

    // ========================================================================
    // production
    // ========================================================================

    /// Stylesheet declarations for built assets: every entry record's CSS
    /// dependencies, plus stylesheet entry records themselves, in collection
    /// order.
    pub fn production_styles(&self, records: &ManifestRecords) -> Vec<AssetTag> {
        let block = self.config.css_block();
        let mut tags = Vec::new();

        for record in records.iter().filter(|r| r.is_entry()) {
            for url in record.css_urls() {
                tags.push(self.style_tag(url, record.metadata().clone(), block));
            }
            if record.is_stylesheet() {
                tags.push(self.style_tag(record.file_url(), record.metadata().clone(), block));
            }
        }

        tags
    }

    /// Script declarations for built assets in collection order.
    ///
    /// The canonical collection order already puts polyfills before legacy
    /// code and legacy before modern modules; this just assigns
    /// `type="module"` or `nomodule` per record.
    pub fn production_scripts(&self, records: &ManifestRecords) -> Vec<AssetTag> {
        let block = self.config.script_block();

        records
            .iter()
            .filter(|record| record.is_entry_script())
            .map(|record| {
                let mut attributes = record.metadata().clone();
                if record.is_module_entry_script() {
                    attributes
                        .entry("type".to_string())
                        .or_insert_with(|| json!("module"));
                } else {
                    attributes
                        .entry("nomodule".to_string())
                        .or_insert_with(|| json!(true));
                }
                AssetTag {
                    kind: AssetKind::Script,
                    url: record.file_url(),
                    attributes,
                    block: block.to_string(),
                }
            })
            .collect()
    }

    // ========================================================================
    // development
    // ========================================================================

    /// Stylesheet declarations served directly from the dev server.
    pub fn development_styles(&self) -> Result<Vec<AssetTag>, ConfigError> {
        let base = self.config.development_url()?;
        let block = self.config.css_block();

        Ok(self
            .config
            .style_entries()?
            .iter()
            .map(|entry| self.style_tag(dev_url(&base, entry), Map::new(), block))
            .collect())
    }

    /// Script declarations served directly from the dev server: the vite
    /// client first, then every configured script entry as an ES module.
    ///
    /// Development rendering without a single script entry is a
    /// configuration mistake, not an empty page.
    pub fn development_scripts(&self) -> Result<Vec<AssetTag>, ConfigError> {
        let entries = self.config.script_entries()?;
        if entries.is_empty() {
            return Err(ConfigError::Invalid(
                "`development.scriptEntries` must name at least one entry for development rendering"
                    .into(),
            ));
        }

        let base = self.config.development_url()?;
        let block = self.config.script_block();

        let mut tags = vec![self.module_script(dev_url(&base, "@vite/client"), block)];
        for entry in &entries {
            tags.push(self.module_script(dev_url(&base, entry), block));
        }
        Ok(tags)
    }

    // ========================================================================
    // helpers
    // ========================================================================

    fn style_tag(&self, url: String, attributes: Map<String, Value>, block: &str) -> AssetTag {
        AssetTag {
            kind: AssetKind::Style,
            url,
            attributes,
            block: block.to_string(),
        }
    }

    fn module_script(&self, url: String, block: &str) -> AssetTag {
        let mut attributes = Map::new();
        attributes.insert("type".into(), json!("module"));
        AssetTag {
            kind: AssetKind::Script,
            url,
            attributes,
            block: block.to_string(),
        }
    }
}

fn dev_url(base: &str, entry: &str) -> String {
    format!("{base}/{}", entry.trim_start_matches('/'))
}

// ============================================================================
// tests
// ============================================================================
