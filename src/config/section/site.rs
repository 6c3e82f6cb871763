//! `[site]` section configuration.
//!
//! Describes the template tree and the languages it is served in.
//!
//! # Example
//!
//! ```toml
//! [site]
//! templates = "templates"                 # Template root (relative to site root)
//! ignore = ["base.html", "partials/"]     # Never routed (exact ids, or directories ending in `/`)
//! entry = "select_language.html"          # Language-selection page, bound once at `/`
//! languages = ["en", "de"]                # Language codes, in order
//! translations = "translations.json"      # URL segment translations (.json or .toml)
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::config::{ConfigDiagnostics, FieldPath};

/// Template tree and language settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Template root directory.
    pub templates: PathBuf,

    /// Template ids excluded from routing.
    pub ignore: Vec<String>,

    /// Template id of the language-selection page.
    pub entry: String,

    /// Language codes.
    pub languages: Vec<String>,

    /// Translation data source. `None` leaves every language untranslated.
    pub translations: Option<PathBuf>,
}

impl Default for SiteSectionConfig {
    fn default() -> Self {
        Self {
            templates: "templates".into(),
            ignore: vec!["base.html".into()],
            entry: "select_language.html".into(),
            languages: vec!["en".into(), "de".into()],
            translations: None,
        }
    }
}

impl SiteSectionConfig {
    pub const IGNORE: FieldPath = FieldPath::new("site.ignore");
    pub const ENTRY: FieldPath = FieldPath::new("site.entry");
    pub const LANGUAGES: FieldPath = FieldPath::new("site.languages");
    pub const TRANSLATIONS: FieldPath = FieldPath::new("site.translations");

    /// Resolve directory paths against the site root.
    pub fn normalize(&mut self, root: &Path) {
        self.templates = crate::utils::path::normalize_path(&root.join(&self.templates));
        if let Some(path) = self.translations.take() {
            self.translations = Some(crate::utils::path::normalize_path(&root.join(path)));
        }
    }

    /// Validate site configuration.
    ///
    /// # Checks
    /// - `languages` is non-empty, unique, and contains no `/`
    /// - `entry` and `ignore` entries are relative template ids
    /// - `translations` exists when configured
    pub fn validate(&self, diag: &mut ConfigDiagnostics) {
        if self.languages.is_empty() {
            diag.error(Self::LANGUAGES, "at least one language is required");
        }

        let mut seen = HashSet::new();
        for language in &self.languages {
            if language.is_empty() || language.contains('/') {
                diag.error_with_hint(
                    Self::LANGUAGES,
                    format!("invalid language code `{language}`"),
                    "language codes become the first URL segment, e.g. \"en\" or \"de-at\"",
                );
            } else if !seen.insert(language.as_str()) {
                diag.error(Self::LANGUAGES, format!("duplicate language code `{language}`"));
            }
        }

        if self.entry.trim_start_matches('/').is_empty() {
            diag.error(Self::ENTRY, "entry page must name a template");
        }
        if Path::new(&self.entry).components().any(|c| c.as_os_str() == "..") {
            diag.error(Self::ENTRY, "entry page must be inside the template directory");
        }

        for pattern in &self.ignore {
            if Path::new(pattern).components().any(|c| c.as_os_str() == "..") {
                diag.error(
                    Self::IGNORE,
                    format!("`{pattern}` must be relative to the template directory"),
                );
            }
        }

        if let Some(path) = &self.translations
            && !path.is_file()
        {
            diag.error_with_hint(
                Self::TRANSLATIONS,
                format!("file `{}` not found", path.display()),
                "remove the field to serve every language untranslated",
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::config::{ConfigDiagnostics, test_parse_config};
    use std::path::PathBuf;

    #[test]
    fn test_site_defaults() {
        let config = test_parse_config("");

        assert_eq!(config.site.templates, PathBuf::from("templates"));
        assert_eq!(config.site.ignore, ["base.html"]);
        assert_eq!(config.site.entry, "select_language.html");
        assert_eq!(config.site.languages, ["en", "de"]);
        assert!(config.site.translations.is_none());
    }

    #[test]
    fn test_site_custom() {
        let config = test_parse_config(
            r#"
[site]
templates = "pages"
ignore = ["layout.html", "partials/"]
entry = "choose.html"
languages = ["fr", "en", "de"]
translations = "i18n/routes.toml"
"#,
        );

        assert_eq!(config.site.templates, PathBuf::from("pages"));
        assert_eq!(config.site.ignore, ["layout.html", "partials/"]);
        assert_eq!(config.site.entry, "choose.html");
        assert_eq!(config.site.languages, ["fr", "en", "de"]);
        assert_eq!(
            config.site.translations,
            Some(PathBuf::from("i18n/routes.toml"))
        );
    }

    #[test]
    fn test_validate_languages() {
        let mut diag = ConfigDiagnostics::new();
        let config = test_parse_config("[site]\nlanguages = []");
        config.site.validate(&mut diag);
        assert_eq!(diag.len(), 1);

        let mut diag = ConfigDiagnostics::new();
        let config = test_parse_config("[site]\nlanguages = [\"en\", \"en\", \"a/b\", \"\"]");
        config.site.validate(&mut diag);
        assert_eq!(diag.len(), 3);
    }

    #[test]
    fn test_validate_entry_and_ignore() {
        let mut diag = ConfigDiagnostics::new();
        let config =
            test_parse_config("[site]\nentry = \"../outside.html\"\nignore = [\"../x.html\"]");
        config.site.validate(&mut diag);
        assert_eq!(diag.len(), 2);
    }

    #[test]
    fn test_validate_missing_translations() {
        let mut diag = ConfigDiagnostics::new();
        let config = test_parse_config("[site]\ntranslations = \"/nonexistent/translations.json\"");
        config.site.validate(&mut diag);
        assert!(!diag.is_empty());
    }

    #[test]
    fn test_validate_defaults_ok() {
        let mut diag = ConfigDiagnostics::new();
        test_parse_config("").site.validate(&mut diag);
        assert!(diag.is_empty());
    }
}
