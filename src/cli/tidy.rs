//! Orphaned build artifact cleanup.
//!
//! Diffs the actual `*.js`/`*.css` files under the output directory against
//! the full set of files the current manifest references (entry and
//! non-entry chunks, plus CSS dependencies) and offers to delete the
//! leftovers from previous builds.

use crate::config::AssetResolutionConfig;
use crate::manifest::ManifestReader;
use crate::{debug, log};
use anyhow::Result;
use rustc_hash::FxHashSet;
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Run the tidy command. Returns the number of files deleted.
pub fn run(config: &AssetResolutionConfig, webroot: &Path, yes: bool, dry_run: bool) -> Result<usize> {
    let records = ManifestReader::from_config(config).read()?;

    // Every file the manifest still references, as webroot-relative paths
    let mut referenced: FxHashSet<PathBuf> = FxHashSet::default();
    for record in records.iter() {
        referenced.insert(url_to_path(webroot, &record.file_url()));
        for css in record.css_urls() {
            referenced.insert(url_to_path(webroot, &css));
        }
    }

    let scan_root = match config.url_base().prefix() {
        "" => webroot.to_path_buf(),
        prefix => webroot.join(prefix),
    };
    debug!("tidy"; "scanning {} against {} manifest entries", scan_root.display(), records.len());

    let orphans = find_orphans(&scan_root, &referenced);

    if orphans.is_empty() {
        log!("tidy"; "there are no outdated files");
        return Ok(0);
    }

    log!("tidy"; "{} outdated file{}:", orphans.len(), plural_s(orphans.len()));
    for orphan in &orphans {
        eprintln!("- {}", orphan.display());
    }

    if dry_run {
        log!("tidy"; "dry run, nothing was deleted");
        return Ok(0);
    }

    if !yes && !confirm_deletion(orphans.len())? {
        log!("tidy"; "nothing was deleted");
        return Ok(0);
    }

    // Per-file failures are reported but never abort the batch
    let mut deleted = 0;
    for orphan in &orphans {
        match fs::remove_file(orphan) {
            Ok(()) => {
                log!("tidy"; "deleted {}", orphan.display());
                deleted += 1;
            }
            Err(err) => {
                log!("error"; "could not delete {}: {}", orphan.display(), err);
            }
        }
    }

    log!("tidy"; "deleted {} of {} file{}", deleted, orphans.len(), plural_s(orphans.len()));
    Ok(deleted)
}

/// Walk the output directory and collect `*.js`/`*.css` files the manifest
/// no longer references, in a deterministic order.
fn find_orphans(scan_root: &Path, referenced: &FxHashSet<PathBuf>) -> Vec<PathBuf> {
    let mut orphans: Vec<PathBuf> = jwalk::WalkDir::new(scan_root)
        .skip_hidden(false)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path())
        .filter(|path| is_build_artifact(path))
        .filter(|path| !referenced.contains(path))
        .collect();
    orphans.sort();
    orphans
}

fn is_build_artifact(path: &Path) -> bool {
    matches!(
        path.extension().and_then(|ext| ext.to_str()),
        Some("js") | Some("css")
    )
}

/// Map a public URL path back onto the web root.
fn url_to_path(webroot: &Path, url: &str) -> PathBuf {
    webroot.join(url.trim_start_matches('/'))
}

/// Prompt before deleting. Returns true only on explicit confirmation.
fn confirm_deletion(count: usize) -> Result<bool> {
    use std::io::{self, Write};

    eprint!("Delete {count} file{}? [y/N] ", plural_s(count));
    io::stderr().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let input = input.trim().to_lowercase();
    Ok(input == "y" || input == "yes")
}

/// Return "s" suffix for plural counts
#[inline]
fn plural_s(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

// ============================================================================
// tests
// ============================================================================
