//! Page bindings - the (url, template, language) units handed to a backend.
//!
//! Materialization is a pure pass over the walker output: every template is
//! bound once per configured language, except the language-selection entry
//! page which is bound once at `/`. The resulting list is handed as a whole
//! to a [`Registrar`] (live route table or static writer).

use serde::Serialize;

use super::route::{localized_url, same_template};
use super::scan::TemplateEntry;
use crate::i18n::Translator;
use crate::log;

/// A page ready to be registered or written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageBinding {
    /// Localized URL, e.g. `/de/test2-de/`.
    pub url: String,
    /// Template identifier relative to the template root.
    pub template: String,
    /// Language of the page; `None` for the entry page.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// All configured language codes, in configured order.
    pub languages: Vec<String>,
}

impl PageBinding {
    /// The language-selection page bound at `/`.
    pub fn entry(template: &str, languages: &[String]) -> Self {
        Self {
            url: "/".to_owned(),
            template: template.trim_start_matches('/').to_owned(),
            language: None,
            languages: languages.to_vec(),
        }
    }

    pub fn is_entry(&self) -> bool {
        self.language.is_none()
    }
}

/// Backend receiving page bindings in registration order.
pub trait Registrar {
    type Error;

    fn register(&mut self, binding: PageBinding) -> Result<(), Self::Error>;
}

/// Materialization inputs that stay fixed for a run.
pub struct Materializer<'a> {
    pub translator: &'a Translator<'a>,
    pub languages: &'a [String],
    pub entry: &'a str,
}

impl Materializer<'_> {
    /// Bind every template for every language.
    ///
    /// Order follows `templates`, then `languages`.
    pub fn materialize(&self, templates: &[TemplateEntry]) -> Vec<PageBinding> {
        let mut bindings = Vec::with_capacity(templates.len() * self.languages.len() + 1);
        let mut has_entry = false;

        for entry in templates {
            if same_template(&entry.template, self.entry) {
                bindings.push(PageBinding::entry(&entry.template, self.languages));
                has_entry = true;
                continue;
            }

            for language in self.languages {
                let localized = self.translator.translate(entry.route.as_str(), language);
                bindings.push(PageBinding {
                    url: localized_url(language, &localized, entry.route.is_index()),
                    template: entry.template.clone(),
                    language: Some(language.clone()),
                    languages: self.languages.to_vec(),
                });
            }
        }

        if !has_entry {
            log!("routes"; "entry page `{}` not found, `/` is not bound", self.entry);
        }

        bindings
    }
}

/// Hand `bindings` to `registrar` in order. Returns the number registered.
pub fn emit<R: Registrar>(
    bindings: Vec<PageBinding>,
    registrar: &mut R,
) -> Result<usize, R::Error> {
    let count = bindings.len();
    for binding in bindings {
        registrar.register(binding)?;
    }
    Ok(count)
}
