//! Path translator - canonical route -> localized route.
//!
//! Translation walks the route segment by segment through the language's
//! tree. It never fails: missing data degrades to a less-localized path
//! and is reported through the logger.
//!
//! ```text
//! /test2/u/v  (de)
//!  test2 -> test2-de    Continue
//!  u     -> u-de        Continue
//!  v     -> (no node)   NoData: copy "v" and stop
//! = /test2-de/u-de/v
//! ```

use std::borrow::Cow;
use std::cell::RefCell;

use rustc_hash::FxHashSet;

use super::table::{LanguageTable, Step, TranslationTable};
use crate::{debug, log};

/// Why a localized path looks the way it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Every segment was translated.
    Translated,
    /// Translation stopped at a segment with no data; it and the rest are verbatim.
    Partial { first_untranslated: String },
    /// A `"#"` marker stopped translation. `from` is `None` when the whole language is literal.
    Literal { from: Option<String> },
    /// The table has no entry for the language.
    NoTable,
}

/// A localized path together with the outcome that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Localized {
    pub path: String,
    pub outcome: Outcome,
}

impl Localized {
    fn identity(canonical: &str, outcome: Outcome) -> Self {
        Self {
            path: with_leading_slash(canonical).into_owned(),
            outcome,
        }
    }
}

/// Localize `canonical` for `language` without logging.
pub fn localize(table: &TranslationTable, canonical: &str, language: &str) -> Localized {
    let mut node = match table.language(language) {
        LanguageTable::Missing => return Localized::identity(canonical, Outcome::NoTable),
        LanguageTable::Literal => {
            return Localized::identity(canonical, Outcome::Literal { from: None });
        }
        LanguageTable::Translate(root) => root,
    };

    let segments: Vec<&str> = canonical.split('/').filter(|s| !s.is_empty()).collect();
    let mut path = String::with_capacity(canonical.len() + 8);

    for (i, segment) in segments.iter().enumerate() {
        let outcome = match node.step(segment) {
            Step::Continue {
                node: child,
                translated,
            } => {
                path.push('/');
                path.push_str(translated);
                node = child;
                continue;
            }
            Step::StopLiteral => Outcome::Literal {
                from: Some((*segment).to_owned()),
            },
            Step::NoData => Outcome::Partial {
                first_untranslated: (*segment).to_owned(),
            },
        };

        for rest in &segments[i..] {
            path.push('/');
            path.push_str(rest);
        }
        return Localized { path, outcome };
    }

    if path.is_empty() {
        path.push('/');
    }

    Localized {
        path,
        outcome: Outcome::Translated,
    }
}

fn with_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Logging front-end over [`localize`].
///
/// A missing language is reported once per language code; partial and
/// literal stops are reported per route in verbose mode.
pub struct Translator<'a> {
    table: &'a TranslationTable,
    reported: RefCell<FxHashSet<String>>,
}

impl<'a> Translator<'a> {
    pub fn new(table: &'a TranslationTable) -> Self {
        Self {
            table,
            reported: RefCell::default(),
        }
    }

    /// Translate a canonical route into `language`.
    pub fn translate(&self, canonical: &str, language: &str) -> String {
        let localized = localize(self.table, canonical, language);

        match &localized.outcome {
            Outcome::Translated => {}
            Outcome::NoTable => {
                if self.reported.borrow_mut().insert(language.to_owned()) {
                    log!("translate"; "no translations for language `{}`, routes stay untranslated", language);
                }
            }
            Outcome::Partial { first_untranslated } => {
                debug!("translate"; "{} ({}): no translation for `{}`, kept as {}",
                    canonical, language, first_untranslated, localized.path);
            }
            Outcome::Literal { from: Some(segment) } => {
                debug!("translate"; "{} ({}): `{}` marked literal", canonical, language, segment);
            }
            Outcome::Literal { from: None } => {}
        }

        localized.path
    }
}
