//! In-memory route table, the live-mode registrar.

use std::convert::Infallible;

use rustc_hash::FxHashMap;

use crate::core::UrlPath;
use crate::log;
use crate::page::{PageBinding, Registrar};

/// URL → binding map answering `GET`/`HEAD` requests.
#[derive(Debug, Default)]
pub struct RouteTable {
    routes: FxHashMap<String, PageBinding>,
}

impl RouteTable {
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Find the binding for `url`.
    ///
    /// Routing is not strict about trailing slashes: when the exact path is
    /// unbound, the same path with its trailing slash toggled is tried.
    pub fn lookup(&self, url: &UrlPath) -> Option<&PageBinding> {
        self.routes.get(url.as_str()).or_else(|| {
            url.toggle_trailing_slash()
                .and_then(|alt| self.routes.get(alt.as_str()))
        })
    }
}

impl Registrar for RouteTable {
    type Error = Infallible;

    fn register(&mut self, binding: PageBinding) -> Result<(), Infallible> {
        if let Some(existing) = self.routes.get(&binding.url) {
            log!(
                "serve";
                "`{}` is bound to both `{}` and `{}`, keeping the first",
                binding.url,
                existing.template,
                binding.template
            );
            return Ok(());
        }
        self.routes.insert(binding.url.clone(), binding);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::emit;

    fn binding(url: &str, template: &str, language: Option<&str>) -> PageBinding {
        PageBinding {
            url: url.to_string(),
            template: template.to_string(),
            language: language.map(str::to_string),
            languages: vec!["en".to_string(), "de".to_string()],
        }
    }

    fn table(bindings: Vec<PageBinding>) -> RouteTable {
        let mut table = RouteTable::default();
        emit(bindings, &mut table).unwrap_or_else(|never| match never {});
        table
    }

    #[test]
    fn test_exact_lookup() {
        let table = table(vec![
            binding("/", "select_language.html", None),
            binding("/de/test2-de/", "test2/index.html", Some("de")),
            binding("/de/test2-de/u-de", "test2/u.html", Some("de")),
        ]);

        let hit = |url: &str| {
            table
                .lookup(&UrlPath::from_browser(url))
                .map(|b| b.template.as_str())
        };
        assert_eq!(hit("/"), Some("select_language.html"));
        assert_eq!(hit("/de/test2-de/"), Some("test2/index.html"));
        assert_eq!(hit("/de/test2-de/u-de"), Some("test2/u.html"));
        assert_eq!(hit("/de/test2/"), None);
        assert_eq!(hit("/en/test2-de/"), None);
    }

    #[test]
    fn test_trailing_slash_is_not_strict() {
        let table = table(vec![
            binding("/en/", "index.html", Some("en")),
            binding("/en/about", "about.html", Some("en")),
        ]);

        let hit = |url: &str| table.lookup(&UrlPath::from_browser(url)).is_some();
        assert!(hit("/en"));
        assert!(hit("/en/about/"));
        assert!(hit("/en/about?x=1"));
    }

    #[test]
    fn test_duplicate_keeps_first() {
        let table = table(vec![
            binding("/en/a", "a.html", Some("en")),
            binding("/en/a", "a/index.html", Some("en")),
        ]);

        assert_eq!(table.len(), 1);
        let found = table.lookup(&UrlPath::from_browser("/en/a")).unwrap();
        assert_eq!(found.template, "a.html");
    }

    #[test]
    fn test_percent_encoded_request() {
        let table = table(vec![binding("/de/über-uns", "about.html", Some("de"))]);
        assert!(table.lookup(&UrlPath::from_browser("/de/%C3%BCber-uns")).is_some());
    }
}
