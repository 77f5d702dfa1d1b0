//! Manifest inspection: print every record with its classification and URL.

use crate::config::AssetResolutionConfig;
use crate::log;
use crate::manifest::{ManifestReader, ManifestRecord};
use anyhow::Result;
use owo_colors::OwoColorize;

/// Print all manifest records in canonical order.
pub fn run(config: &AssetResolutionConfig) -> Result<()> {
    let records = ManifestReader::from_config(config).read()?;

    log!("list"; "{} record(s) in {}", records.len(), records.manifest_path().display());
    for record in &records {
        println!(
            "{:<12} {} {}",
            classification(record).dimmed(),
            record.key().bold(),
            record.file_url()
        );
        for css in record.css_urls() {
            println!("{:<12} {} {}", "css dep".dimmed(), "", css);
        }
    }

    Ok(())
}

/// Short human-readable label for a record's classification.
fn classification(record: &ManifestRecord) -> &'static str {
    if record.is_polyfill() {
        "polyfill"
    } else if record.is_legacy() {
        "legacy"
    } else if record.is_module_entry_script() {
        "module"
    } else if record.is_stylesheet() {
        "stylesheet"
    } else if record.is_entry() {
        "entry"
    } else {
        "chunk"
    }
}
