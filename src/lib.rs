//! Vite manifest integration for server-rendered applications.
//!
//! Reads a bundler-produced asset manifest (mapping source entry files to
//! hashed build outputs) and resolves the correct public URL and tag
//! attributes for each asset, choosing between a live dev server and built
//! production assets based on request-derived signals.
//!
//! # Overview
//!
//! ```text
//! AssetResolutionConfig -> ManifestReader -> ManifestRecords
//!     -> ManifestRecord (per chunk) -> URL + classification
//!     -> TagPlanner -> (url, kind, attributes) -> external markup emitter
//! ```
//!
//! The crate never formats HTML itself and never reads framework request
//! objects: the host supplies the raw signals ([`render::is_dev`]) and an
//! implementation of [`render::MarkupEmitter`].
//!
//! # Example
//!
//! ```no_run
//! use vite_bridge::{AssetResolutionConfig, ManifestReader, TagPlanner, render};
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = AssetResolutionConfig::default();
//!
//! if render::decide(&config, Some("example.com"), false) {
//!     let planner = TagPlanner::new(&config);
//!     let _scripts = planner.development_scripts()?;
//! } else {
//!     let records = ManifestReader::from_config(&config).read()?;
//!     let planner = TagPlanner::new(&config);
//!     let _styles = planner.production_styles(&records);
//!     let _scripts = planner.production_scripts(&records);
//! }
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod logger;
pub mod manifest;
pub mod render;

pub use config::{AssetResolutionConfig, OutDir};
pub use error::{ConfigError, InvalidFilterError, ManifestError};
pub use manifest::{Filter, ManifestReader, ManifestRecord, ManifestRecords};
pub use render::{AssetKind, AssetTag, MarkupEmitter, TagPlanner};
