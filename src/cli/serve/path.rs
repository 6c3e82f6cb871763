//! Asset URL to filesystem path resolution.

use std::path::{Path, PathBuf};

/// Resolve an asset path (relative to the asset URL prefix, already decoded)
/// to a file under `asset_dir`, serving `index.html` for directories.
///
/// Returns `None` for missing files and for anything that escapes
/// `asset_dir`.
pub fn resolve_path(relative: &str, asset_dir: &Path) -> Option<PathBuf> {
    let clean = relative.trim_matches('/');

    // Reject paths with suspicious patterns early
    if clean.split('/').any(|segment| segment == "..") || clean.contains('\\') {
        return None;
    }

    let local = asset_dir.join(clean);

    // Canonicalize to resolve symlinks and verify path is under asset_dir
    let canonical = local.canonicalize().ok()?;
    let root_canonical = asset_dir.canonicalize().ok()?;

    if !canonical.starts_with(&root_canonical) {
        return None;
    }

    if canonical.is_file() {
        return Some(canonical);
    }

    if canonical.is_dir() {
        let index = canonical.join("index.html");
        if index.is_file() {
            return Some(index);
        }
    }

    None
}
