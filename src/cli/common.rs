//! Pipeline shared by every command: load translations, walk templates,
//! materialize page bindings.

use anyhow::{Context, Result};

use crate::config::SiteConfig;
use crate::i18n::{TranslationTable, Translator};
use crate::page::{Materializer, PageBinding, scan_templates};
use crate::{debug, log};

/// Load the configured translation table.
///
/// Without `site.translations`, the table is empty and every language is
/// served untranslated.
pub fn load_table(config: &SiteConfig) -> Result<TranslationTable> {
    let Some(path) = &config.site.translations else {
        debug!("translate"; "no translation table configured");
        return Ok(TranslationTable::default());
    };

    let table = TranslationTable::load(path)
        .with_context(|| format!("Failed to load translations from {}", path.display()))?;
    if table.is_empty() {
        log!("translate"; "{} has no languages", config.root_relative(path).display());
    }
    debug!(
        "translate";
        "loaded {} ({} languages)",
        config.root_relative(path).display(),
        table.languages().count()
    );
    Ok(table)
}

/// Run load → walk → materialize and return every page binding, in
/// registration order.
pub fn collect_bindings(config: &SiteConfig) -> Result<Vec<PageBinding>> {
    let table = load_table(config)?;
    let templates = scan_templates(&config.site.templates, &config.site.ignore)
        .context("Failed to scan templates")?;

    if templates.is_empty() {
        log!(
            "routes";
            "no templates in {}",
            config.root_relative(&config.site.templates).display()
        );
    }

    let translator = Translator::new(&table);
    let materializer = Materializer {
        translator: &translator,
        languages: &config.site.languages,
        entry: &config.site.entry,
    };
    Ok(materializer.materialize(&templates))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::write_tree;
    use tempfile::TempDir;

    fn site(dir: &TempDir, translations: Option<&str>) -> SiteConfig {
        let mut config = SiteConfig::default();
        config.root = dir.path().to_path_buf();
        config.site.templates = dir.path().join("templates");
        if let Some(content) = translations {
            let path = dir.path().join("translations.json");
            std::fs::write(&path, content).unwrap();
            config.site.translations = Some(path);
        }
        config
    }

    #[test]
    fn test_collect_without_table() {
        let dir = TempDir::new().unwrap();
        write_tree(
            &dir.path().join("templates"),
            &["base.html", "select_language.html", "about.html"],
        );

        let bindings = collect_bindings(&site(&dir, None)).unwrap();
        let urls: Vec<_> = bindings.iter().map(|b| b.url.as_str()).collect();
        assert_eq!(urls, ["/en/about", "/de/about", "/"]);
    }

    #[test]
    fn test_collect_with_table() {
        let dir = TempDir::new().unwrap();
        write_tree(&dir.path().join("templates"), &["about.html"]);

        let config = site(&dir, Some(r#"{"de": {"about": {"index": "ueber-uns"}}}"#));
        let bindings = collect_bindings(&config).unwrap();
        let urls: Vec<_> = bindings.iter().map(|b| b.url.as_str()).collect();
        assert_eq!(urls, ["/en/about", "/de/ueber-uns"]);
    }

    #[test]
    fn test_malformed_table_is_fatal() {
        let dir = TempDir::new().unwrap();
        write_tree(&dir.path().join("templates"), &["about.html"]);

        let config = site(&dir, Some(r#"{"de": ["not", "a", "node"]}"#));
        assert!(collect_bindings(&config).is_err());
    }

    #[test]
    fn test_missing_template_dir_is_fatal() {
        let dir = TempDir::new().unwrap();
        assert!(collect_bindings(&site(&dir, None)).is_err());
    }
}
