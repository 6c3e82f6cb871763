//! `[build]` section configuration.
//!
//! Settings for publishing the site as static HTML.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "rendered_templates"   # Output directory (relative to site root)
//! clean = true                    # Delete and recreate the output directory first
//! gitkeep = true                  # Keep the fresh output directory tracked by git
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildSectionConfig {
    /// Publish output directory.
    pub output: PathBuf,

    /// Recreate the output directory before publishing.
    pub clean: bool,

    /// Write an empty `.gitkeep` into a recreated output directory.
    pub gitkeep: bool,
}

impl Default for BuildSectionConfig {
    fn default() -> Self {
        Self {
            output: "rendered_templates".into(),
            clean: true,
            gitkeep: true,
        }
    }
}

impl BuildSectionConfig {
    pub const OUTPUT: FieldPath = FieldPath::new("build.output");

    pub fn normalize(&mut self, root: &Path) {
        self.output = crate::utils::path::normalize_path(&root.join(&self.output));
    }

    /// Validate build configuration.
    ///
    /// The output directory must not contain the site root or the template
    /// directory, since `clean` deletes it.
    pub fn validate(&self, root: &Path, templates: &Path, diag: &mut ConfigDiagnostics) {
        if root.starts_with(&self.output) {
            diag.error(Self::OUTPUT, "output directory must not contain the site root");
        } else if templates.starts_with(&self.output) {
            diag.error(
                Self::OUTPUT,
                "output directory must not contain the template directory",
            );
        }
    }
}
