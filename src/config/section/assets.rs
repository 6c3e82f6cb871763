//! `[assets]` section configuration.
//!
//! Static files served next to the pages, unchanged.
//!
//! # Example
//!
//! ```toml
//! [assets]
//! dir = "static"      # Asset directory (relative to site root, may be absent)
//! url = "/static"     # URL prefix the assets are served under
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetsConfig {
    /// Asset source directory.
    pub dir: PathBuf,

    /// URL prefix, starting with `/`.
    pub url: String,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            dir: "static".into(),
            url: "/static".into(),
        }
    }
}

impl AssetsConfig {
    pub const URL: FieldPath = FieldPath::new("assets.url");

    pub fn normalize(&mut self, root: &Path) {
        self.dir = crate::utils::path::normalize_path(&root.join(&self.dir));
    }

    /// URL prefix without trailing slash.
    pub fn url_prefix(&self) -> &str {
        self.url.trim_end_matches('/')
    }

    /// Path of `url` relative to the asset directory, if it lies under the prefix.
    pub fn strip_url<'a>(&self, url: &'a str) -> Option<&'a str> {
        let rest = url.strip_prefix(self.url_prefix())?;
        if rest.is_empty() {
            return Some("");
        }
        rest.strip_prefix('/')
    }

    /// Validate asset configuration.
    ///
    /// # Checks
    /// - `url` starts with `/` and is not `/`
    /// - `url` does not shadow a language prefix
    pub fn validate(&self, languages: &[String], diag: &mut ConfigDiagnostics) {
        if !self.url.starts_with('/') {
            diag.error_with_hint(
                Self::URL,
                format!("`{}` must start with `/`", self.url),
                "e.g. \"/static\"",
            );
            return;
        }

        let first = self.url_prefix().trim_start_matches('/');
        let first = first.split('/').next().unwrap_or_default();
        if first.is_empty() {
            diag.error(Self::URL, "assets cannot be served at `/`");
        } else if languages.iter().any(|l| l == first) {
            diag.error(
                Self::URL,
                format!("`{}` shadows the pages of language `{first}`", self.url),
            );
        }
    }
}
