//! URL path type for request handling.
//!
//! - Internal representation: Always decoded (human-readable)
//! - Browser boundary: Decode on input

use std::borrow::Borrow;
use std::sync::Arc;

use percent_encoding::percent_decode_str;

/// Decoded request path
///
/// Invariants:
/// - Always decoded (no percent-encoding)
/// - Always starts with `/`
/// - No query string or fragment
/// - Trailing slash kept exactly as requested
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UrlPath(Arc<str>);

impl UrlPath {
    /// Create from browser URL (strip query string and fragment, decode
    /// percent-encoding).
    pub fn from_browser(encoded: &str) -> Self {
        let path = encoded.split(['?', '#']).next().unwrap_or(encoded);
        let decoded = percent_decode_str(path)
            .decode_utf8()
            .map(|s| s.into_owned())
            .unwrap_or_else(|_| path.to_string());
        Self::from_decoded(&decoded)
    }

    /// Create from an already decoded path. Adds the leading slash if missing.
    pub fn from_decoded(decoded: &str) -> Self {
        let trimmed = decoded.trim();
        if trimmed.starts_with('/') {
            Self(Arc::from(trimmed))
        } else {
            Self(Arc::from(format!("/{trimmed}")))
        }
    }

    /// Get the decoded URL path as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The same path with its trailing slash added or removed.
    ///
    /// `/en/about` -> `/en/about/`, `/en/` -> `/en`, `/` -> `None`
    pub fn toggle_trailing_slash(&self) -> Option<String> {
        if self.is_root() {
            return None;
        }
        match self.0.strip_suffix('/') {
            Some(trimmed) => Some(trimmed.to_string()),
            None => Some(format!("{}/", self.0)),
        }
    }

    /// Check if this is the site root.
    #[inline]
    pub fn is_root(&self) -> bool {
        self.0.as_ref() == "/"
    }
}

impl std::fmt::Display for UrlPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for UrlPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for UrlPath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<&str> for UrlPath {
    fn eq(&self, other: &&str) -> bool {
        self.0.as_ref() == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_browser_utf8() {
        let url = UrlPath::from_browser("/de/%C3%BCber-uns");
        assert_eq!(url.as_str(), "/de/über-uns");
    }

    #[test]
    fn test_from_browser_space() {
        let url = UrlPath::from_browser("/en/hello%20world/");
        assert_eq!(url.as_str(), "/en/hello world/");
    }

    #[test]
    fn test_from_browser_special_chars() {
        let url = UrlPath::from_browser("/en/%26%3D%3F/");
        assert_eq!(url.as_str(), "/en/&=?/");
    }

    #[test]
    fn test_from_browser_invalid_utf8() {
        // Invalid UTF-8 sequence should be preserved
        let url = UrlPath::from_browser("/en/%FF/");
        assert_eq!(url.as_str(), "/en/%FF/");
    }

    #[test]
    fn test_from_browser_strips_query_and_fragment() {
        assert_eq!(UrlPath::from_browser("/en/about?v=1"), "/en/about");
        assert_eq!(UrlPath::from_browser("/en/about#team"), "/en/about");
        assert_eq!(UrlPath::from_browser("/en/?v=1#top"), "/en/");
        assert_eq!(UrlPath::from_browser("?v=1"), "/");
    }

    #[test]
    fn test_keeps_trailing_slash() {
        assert_eq!(UrlPath::from_browser("/en/"), "/en/");
        assert_eq!(UrlPath::from_browser("/en"), "/en");
    }

    #[test]
    fn test_adds_leading_slash() {
        assert_eq!(UrlPath::from_decoded("en/about"), "/en/about");
        assert_eq!(UrlPath::from_decoded(""), "/");
    }

    #[test]
    fn test_toggle_trailing_slash() {
        assert_eq!(
            UrlPath::from_decoded("/en/about").toggle_trailing_slash(),
            Some("/en/about/".to_string())
        );
        assert_eq!(
            UrlPath::from_decoded("/en/").toggle_trailing_slash(),
            Some("/en".to_string())
        );
        assert_eq!(UrlPath::from_decoded("/").toggle_trailing_slash(), None);
    }

    #[test]
    fn test_hash_and_borrow() {
        use rustc_hash::FxHashSet;

        let mut set = FxHashSet::default();
        set.insert(UrlPath::from_decoded("/en/"));
        set.insert(UrlPath::from_browser("/en/"));

        assert_eq!(set.len(), 1);
        assert!(set.contains("/en/"));
    }

    #[test]
    fn test_display() {
        let url = UrlPath::from_browser("/en/hello%20world");
        assert_eq!(format!("{}", url), "/en/hello world");
    }
}
