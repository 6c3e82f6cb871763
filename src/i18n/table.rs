//! Translation table - per-language segment trees.
//!
//! The table is loaded once at startup and never mutated afterwards.
//!
//! # Format
//!
//! ```json
//! {
//!   "en": { "index": "#" },
//!   "de": {
//!     "test2": { "index": "test2-de", "u": { "index": "u-de" } }
//!   }
//! }
//! ```
//!
//! Every node is an object. The reserved key `index` holds the replacement
//! for the segment the node stands for, or `"#"` to keep that segment and
//! everything beneath it literal. All other keys are child nodes keyed by
//! canonical segment. A replacement must be a single URL segment: no `/`,
//! `\`, `?` or `#`, and never `.` or `..`.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Sentinel value meaning "keep this segment and everything beneath it".
pub const LITERAL_MARKER: &str = "#";

/// Errors raised while loading the translation data source.
#[derive(Debug, Error)]
pub enum TableError {
    #[error("IO error when reading translations `{0}`")]
    Io(PathBuf, #[source] std::io::Error),

    #[error("malformed translations in `{0}`")]
    Json(PathBuf, #[source] serde_json::Error),

    #[error("malformed translations in `{0}`")]
    Toml(PathBuf, #[source] toml::de::Error),

    #[error("unsupported translations format `{0}` (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    #[error("`{value}` is not a valid URL segment (language `{language}`, route `{route}`)")]
    InvalidSegment {
        language: String,
        route: String,
        value: String,
    },
}

/// Value of a node's reserved `index` key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum Marker {
    /// `"#"`: stop translating, keep the rest literal.
    Literal,
    /// Localized replacement for this segment.
    Replace(String),
}

impl From<String> for Marker {
    fn from(value: String) -> Self {
        if value == LITERAL_MARKER {
            Self::Literal
        } else {
            Self::Replace(value)
        }
    }
}

/// One level of a language's segment tree.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct TranslationNode {
    #[serde(rename = "index", default)]
    marker: Option<Marker>,

    #[serde(flatten)]
    children: BTreeMap<String, TranslationNode>,
}

/// Result of descending one segment into a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step<'a> {
    /// Segment translates; continue below `node`.
    Continue {
        node: &'a TranslationNode,
        translated: &'a str,
    },
    /// Segment is marked literal; keep it and the rest untouched.
    StopLiteral,
    /// No usable data for this segment.
    NoData,
}

/// How a language is configured at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageTable<'a> {
    /// Translate starting at this root node.
    Translate(&'a TranslationNode),
    /// Root marked `"#"`: the whole language is untranslated on purpose.
    Literal,
    /// No entry for the language at all.
    Missing,
}

/// Whether `value` can stand in for exactly one URL segment.
///
/// Empty values are accepted and treated as missing.
pub fn is_valid_segment(value: &str) -> bool {
    value != "."
        && value != ".."
        && !value.contains(['/', '\\', '?', '#'])
}

impl TranslationNode {
    pub fn marker(&self) -> Option<&Marker> {
        self.marker.as_ref()
    }

    /// Child node for a canonical segment.
    ///
    /// The reserved `index` key is never a child.
    pub fn child(&self, segment: &str) -> Option<&TranslationNode> {
        self.children.get(segment)
    }

    /// Descend into `segment`.
    pub fn step(&self, segment: &str) -> Step<'_> {
        let Some(child) = self.child(segment) else {
            return Step::NoData;
        };

        match child.marker() {
            Some(Marker::Literal) => Step::StopLiteral,
            // An empty replacement would collapse the segment into `//`
            Some(Marker::Replace(translated)) if !translated.is_empty() => Step::Continue {
                node: child,
                translated,
            },
            _ => Step::NoData,
        }
    }

    /// Check every replacement beneath this node; `route` is the canonical
    /// route of the node itself.
    fn check(&self, language: &str, route: &mut String) -> Result<(), TableError> {
        for (segment, child) in &self.children {
            let len = route.len();
            route.push('/');
            route.push_str(segment);

            match child.marker() {
                Some(Marker::Replace(value)) if !is_valid_segment(value) => {
                    return Err(TableError::InvalidSegment {
                        language: language.to_owned(),
                        route: route.clone(),
                        value: value.clone(),
                    });
                }
                _ => {}
            }
            child.check(language, route)?;
            route.truncate(len);
        }
        Ok(())
    }
}

/// Immutable language code -> segment tree mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct TranslationTable {
    languages: BTreeMap<String, TranslationNode>,
}

impl TranslationTable {
    /// Load the table from a `.json` or `.toml` file.
    ///
    /// A replacement that is not a single URL segment (see
    /// [`is_valid_segment`]) makes the whole table malformed.
    pub fn load(path: &Path) -> Result<Self, TableError> {
        let content =
            fs::read_to_string(path).map_err(|err| TableError::Io(path.to_path_buf(), err))?;

        let table: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&content)
                .map_err(|err| TableError::Json(path.to_path_buf(), err))?,
            Some("toml") => {
                toml::from_str(&content).map_err(|err| TableError::Toml(path.to_path_buf(), err))?
            }
            _ => return Err(TableError::UnsupportedFormat(path.to_path_buf())),
        };

        table.check()?;
        Ok(table)
    }

    fn check(&self) -> Result<(), TableError> {
        let mut route = String::new();
        for (language, root) in &self.languages {
            root.check(language, &mut route)?;
        }
        Ok(())
    }

    /// Root node for a language, if the table has one.
    pub fn lookup(&self, language: &str) -> Option<&TranslationNode> {
        self.languages.get(language)
    }

    /// Classify a language's top-level configuration.
    pub fn language(&self, language: &str) -> LanguageTable<'_> {
        match self.lookup(language) {
            None => LanguageTable::Missing,
            Some(root) if root.marker() == Some(&Marker::Literal) => LanguageTable::Literal,
            Some(root) => LanguageTable::Translate(root),
        }
    }

    /// Language codes present in the table.
    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.languages.keys().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.languages.is_empty()
    }
}

#[cfg(test)]
pub(crate) fn test_table() -> TranslationTable {
    serde_json::from_value(serde_json::json!({
        "en": { "index": "#" },
        "de": { "test2": { "index": "test2-de", "u": { "index": "u-de" } } }
    }))
    .unwrap()
}
