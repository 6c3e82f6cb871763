//! Route string rules - template id -> canonical route -> localized URL.
//!
//! Pure functions, no filesystem access.
//!
//! ```text
//! template id          canonical   is_index   url (de, "about" -> "ueber-uns")
//! index.html           /           true       /de/
//! about.html           /about      false      /de/ueber-uns
//! about/index.html     /about      true       /de/ueber-uns/
//! about/team.html      /about/team false      /de/ueber-uns/team
//! ```

use std::fmt;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// File stem that marks a directory-index template.
pub const INDEX_STEM: &str = "index";

/// Output file name for URLs ending in `/`.
pub const INDEX_HTML: &str = "index.html";

/// Language-neutral route derived from a template's location.
///
/// Invariants:
/// - Always starts with `/`
/// - Never ends with `/`, except the root `/`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct CanonicalRoute {
    path: String,
    is_index: bool,
}

impl CanonicalRoute {
    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Whether the route came from a directory-index template.
    pub const fn is_index(&self) -> bool {
        self.is_index
    }
}

impl fmt::Display for CanonicalRoute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Template identifier for a path relative to the template root.
///
/// Components are joined with `/` on every platform. Returns `None` for
/// non-UTF-8 or non-normal components (`..`, prefixes).
pub fn template_id(relative: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            _ => return None,
        }
    }
    (!parts.is_empty()).then(|| parts.join("/"))
}

/// Strip the extension of the final component.
///
/// ```ignore
/// assert_eq!(strip_extension("dir/page.html"), "dir/page");
/// assert_eq!(strip_extension("dir.v2/page"), "dir.v2/page");
/// ```
pub fn strip_extension(id: &str) -> &str {
    let name_start = id.rfind('/').map_or(0, |i| i + 1);
    match id[name_start..].rfind('.') {
        // a leading dot is a hidden file, not an extension
        Some(dot) if dot > 0 => &id[..name_start + dot],
        _ => id,
    }
}

/// Whether the template is a directory index (`index.<ext>`).
pub fn is_index_file(id: &str) -> bool {
    let stem = strip_extension(id);
    let name = stem.rsplit('/').next().unwrap_or(stem);
    name == INDEX_STEM
}

/// Canonical route of a template id.
pub fn canonical_route(id: &str) -> CanonicalRoute {
    let id = id.trim_start_matches('/');
    let stem = strip_extension(id);
    let is_index = is_index_file(id);

    let route = if is_index {
        stem[..stem.len() - INDEX_STEM.len()].trim_end_matches('/')
    } else {
        stem
    };

    CanonicalRoute {
        path: format!("/{route}"),
        is_index,
    }
}

/// Whether a template id is excluded by the ignore list.
///
/// Patterns match exact ids; patterns ending in `/` match everything
/// beneath that directory. Leading `/` is insignificant on both sides.
pub fn is_ignored(id: &str, patterns: &[String]) -> bool {
    let id = id.trim_start_matches('/');
    patterns.iter().any(|pattern| {
        let pattern = pattern.trim_start_matches('/');
        match pattern.strip_suffix('/') {
            Some(dir) => id.strip_prefix(dir).is_some_and(|rest| rest.starts_with('/')),
            None => id == pattern,
        }
    })
}

/// Whether two template ids name the same file.
pub fn same_template(a: &str, b: &str) -> bool {
    a.trim_start_matches('/') == b.trim_start_matches('/')
}

/// Final URL for a localized route: `/<language><localized>`.
///
/// Directory-index routes always end with `/`, other routes never do.
pub fn localized_url(language: &str, localized: &str, is_index: bool) -> String {
    let localized = localized.trim_end_matches('/');
    if localized.is_empty() {
        return format!("/{language}/");
    }
    if is_index {
        format!("/{language}{localized}/")
    } else {
        format!("/{language}{localized}")
    }
}

/// Output file for a URL when publishing.
///
/// ```text
/// /            -> <out>/index.html
/// /de/         -> <out>/de/index.html
/// /de/a/       -> <out>/de/a/index.html
/// /de/a/b      -> <out>/de/a/b.html
/// ```
///
/// Returns `None` when a segment is `.` or `..` or contains `\`.
pub fn output_file_for_url(output_dir: &Path, url: &str) -> Option<PathBuf> {
    let trimmed = url.trim_start_matches('/');
    let segments: Vec<&str> = trimmed.split('/').filter(|s| !s.is_empty()).collect();
    if segments
        .iter()
        .any(|s| *s == "." || *s == ".." || s.contains('\\'))
    {
        return None;
    }

    let mut path = output_dir.to_path_buf();
    if trimmed.is_empty() || trimmed.ends_with('/') {
        path.extend(&segments);
        path.push(INDEX_HTML);
        return Some(path);
    }

    let (name, dirs) = segments.split_last()?;
    path.extend(dirs);
    path.push(format!("{name}.html"));
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_id() {
        assert_eq!(
            template_id(Path::new("dir/sub/page.html")).as_deref(),
            Some("dir/sub/page.html")
        );
        assert_eq!(
            template_id(Path::new("./index.html")).as_deref(),
            Some("index.html")
        );
        assert_eq!(template_id(Path::new("../escape.html")), None);
        assert_eq!(template_id(Path::new("")), None);
    }

    #[test]
    fn test_strip_extension() {
        assert_eq!(strip_extension("page.html"), "page");
        assert_eq!(strip_extension("dir/page.html"), "dir/page");
        assert_eq!(strip_extension("dir.v2/page"), "dir.v2/page");
        assert_eq!(strip_extension("archive.tar.gz"), "archive.tar");
        assert_eq!(strip_extension("dir/.hidden"), "dir/.hidden");
    }

    #[test]
    fn test_is_index_file() {
        assert!(is_index_file("index.html"));
        assert!(is_index_file("dir/index.html"));
        assert!(is_index_file("dir/index.jinja"));
        assert!(!is_index_file("dir/reindex.html"));
        assert!(!is_index_file("index/page.html"));
    }

    #[test]
    fn test_canonical_route() {
        let route = canonical_route("index.html");
        assert_eq!(route.as_str(), "/");
        assert!(route.is_index());

        let route = canonical_route("dir/index.html");
        assert_eq!(route.as_str(), "/dir");
        assert!(route.is_index());

        let route = canonical_route("dir/sub/page.html");
        assert_eq!(route.as_str(), "/dir/sub/page");
        assert!(!route.is_index());

        assert_eq!(canonical_route("/about.html").as_str(), "/about");
    }

    #[test]
    fn test_canonical_route_invariants() {
        for id in ["index.html", "a.html", "a/index.html", "a/b/c.html", "a/b/index.htm"] {
            let route = canonical_route(id);
            let path = route.as_str();
            assert!(path.starts_with('/'), "{id} -> {path}");
            assert!(path == "/" || !path.ends_with('/'), "{id} -> {path}");
        }
    }

    #[test]
    fn test_is_ignored() {
        let patterns = vec![
            "base.html".to_string(),
            "/layout/main.html".to_string(),
            "partials/".to_string(),
        ];

        assert!(is_ignored("base.html", &patterns));
        assert!(is_ignored("layout/main.html", &patterns));
        assert!(is_ignored("partials/nav.html", &patterns));
        assert!(is_ignored("partials/deep/footer.html", &patterns));

        assert!(!is_ignored("dir/base.html", &patterns));
        assert!(!is_ignored("partials.html", &patterns));
        assert!(!is_ignored("partialsx/nav.html", &patterns));
        assert!(!is_ignored("about.html", &[]));
    }

    #[test]
    fn test_localized_url() {
        assert_eq!(localized_url("de", "/", true), "/de/");
        assert_eq!(localized_url("de", "/test2-de", true), "/de/test2-de/");
        assert_eq!(localized_url("de", "/test2-de/u-de", false), "/de/test2-de/u-de");
        assert_eq!(localized_url("en", "/about", false), "/en/about");
    }

    #[test]
    fn test_output_file_for_url() {
        let out = Path::new("/out");

        let file = |url| output_file_for_url(out, url).unwrap();

        assert_eq!(file("/"), out.join("index.html"));
        assert_eq!(file("/de/"), out.join("de").join("index.html"));
        assert_eq!(file("/de/a/"), out.join("de").join("a").join("index.html"));
        assert_eq!(file("/de/a/b"), out.join("de").join("a").join("b.html"));
        assert_eq!(file("/en"), out.join("en.html"));
        assert_eq!(file("/de/a.b/c"), out.join("de").join("a.b").join("c.html"));
    }

    #[test]
    fn test_output_file_stays_inside_output() {
        let out = Path::new("/out");

        for url in ["/de/../../", "/de/..", "/de/./a", "/../index", "/de/a\\..\\b"] {
            assert_eq!(output_file_for_url(out, url), None, "{url}");
        }
    }
}
