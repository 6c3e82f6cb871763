//! Template tree walker.
//!
//! Discovers every template under the template root before any route is
//! registered. Traversal is serial and sorted by file name, so the output
//! order is stable across runs.

use std::fs;
use std::path::{Path, PathBuf};

use jwalk::{Parallelism, WalkDir};
use serde::Serialize;
use thiserror::Error;

use super::route::{CanonicalRoute, canonical_route, is_ignored, template_id};
use crate::debug;

/// Files that are never templates.
const IGNORED_FILES: &[&str] = &[".DS_Store", "Thumbs.db"];

/// Errors that stop the walk. All of them are fatal at startup.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("template directory `{0}` does not exist")]
    MissingRoot(PathBuf),

    #[error("template path `{0}` is not a directory")]
    NotADirectory(PathBuf),

    #[error("failed to read template directory `{0}`")]
    Walk(PathBuf, #[source] jwalk::Error),

    #[error("template path `{0}` is not valid UTF-8")]
    InvalidPath(PathBuf),
}

/// A discovered template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    /// Route derived from the template's location.
    pub route: CanonicalRoute,
    /// Path relative to the template root, `/`-separated.
    pub template: String,
}

impl TemplateEntry {
    pub fn new(template: impl Into<String>) -> Self {
        let template = template.into();
        Self {
            route: canonical_route(&template),
            template,
        }
    }
}

/// Walk `root` depth-first and return every routable template.
///
/// Symlinks are followed. Entries matching `ignore` (see [`is_ignored`])
/// and hidden files are skipped.
pub fn scan_templates(root: &Path, ignore: &[String]) -> Result<Vec<TemplateEntry>, ScanError> {
    let metadata = fs::metadata(root).map_err(|_| ScanError::MissingRoot(root.to_path_buf()))?;
    if !metadata.is_dir() {
        return Err(ScanError::NotADirectory(root.to_path_buf()));
    }

    let walker = WalkDir::new(root)
        .sort(true)
        .skip_hidden(true)
        .follow_links(true)
        .parallelism(Parallelism::Serial);

    let mut templates = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|err| ScanError::Walk(root.to_path_buf(), err))?;
        let file_type = entry.file_type();
        if file_type.is_dir() {
            continue;
        }
        if !file_type.is_file() {
            debug!("scan"; "skipping {}, not a regular file", entry.path().display());
            continue;
        }

        let name = entry.file_name().to_str().unwrap_or_default();
        if IGNORED_FILES.contains(&name) {
            continue;
        }

        let path = entry.path();
        let relative = path.strip_prefix(root).unwrap_or(&path);
        let id = template_id(relative).ok_or_else(|| ScanError::InvalidPath(path.clone()))?;

        if is_ignored(&id, ignore) {
            debug!("scan"; "ignoring {}", id);
            continue;
        }

        templates.push(TemplateEntry::new(id));
    }

    debug!("scan"; "found {} templates in {}", templates.len(), root.display());
    Ok(templates)
}

#[cfg(test)]
pub(crate) fn write_tree(root: &Path, files: &[&str]) {
    for file in files {
        let path = root.join(file);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, format!("<p>{file}</p>")).unwrap();
    }
}
