//! Live server: every page binding answered from memory.
//!
//! # Request flow
//!
//! ```text
//! request ─► method GET/HEAD? ──no──► 405
//!               │
//!               ▼
//!         under assets.url? ──yes──► file from assets.dir (or 404)
//!               │
//!               ▼
//!         route table hit? ──no──► 404
//!               │
//!               ▼
//!         render template ──err──► 500 with the error
//!               │
//!               ▼
//!              200
//! ```

mod lifecycle;
mod path;
mod response;
mod table;

pub use table::RouteTable;

use crate::{
    config::{AssetsConfig, SiteConfig},
    core::{UrlPath, is_shutdown, register_server},
    debug, log,
    page::{PageBinding, emit},
    render::{Render, RenderError, TemplateRenderer},
};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;
use tiny_http::{Method, Request};

/// What to answer a request with.
#[derive(Debug)]
pub enum Reply<'a> {
    Asset(PathBuf),
    Page(&'a PageBinding, String),
    RenderFailed(RenderError),
    NotFound,
    MethodNotAllowed,
}

impl Reply<'_> {
    fn status(&self) -> u16 {
        match self {
            Self::Asset(_) | Self::Page(..) => 200,
            Self::RenderFailed(_) => 500,
            Self::NotFound => 404,
            Self::MethodNotAllowed => 405,
        }
    }
}

/// Routes, renderer and assets of a running server.
pub struct LiveSite<R> {
    routes: RouteTable,
    renderer: R,
    assets: AssetsConfig,
}

impl<R: Render> LiveSite<R> {
    /// Register every binding into a fresh route table.
    pub fn new(bindings: Vec<PageBinding>, renderer: R, assets: AssetsConfig) -> Self {
        let mut routes = RouteTable::default();
        emit(bindings, &mut routes).unwrap_or_else(|never| match never {});
        Self {
            routes,
            renderer,
            assets,
        }
    }

    pub fn routes(&self) -> &RouteTable {
        &self.routes
    }

    /// Decide the reply for `method` on the raw request URL.
    pub fn resolve(&self, method: &Method, raw_url: &str) -> Reply<'_> {
        if !response::is_read_method(method) {
            return Reply::MethodNotAllowed;
        }

        let url = UrlPath::from_browser(raw_url);

        if let Some(relative) = self.assets.strip_url(url.as_str()) {
            return match path::resolve_path(relative, &self.assets.dir) {
                Some(file) => Reply::Asset(file),
                None => Reply::NotFound,
            };
        }

        let Some(binding) = self.routes.lookup(&url) else {
            return Reply::NotFound;
        };

        match self.renderer.render(binding) {
            Ok(html) => Reply::Page(binding, html),
            Err(e) => Reply::RenderFailed(e),
        }
    }

    /// Handle a single HTTP request
    fn handle_request(&self, request: Request) -> Result<()> {
        // Early exit if shutdown requested
        if is_shutdown() {
            return response::respond_unavailable(request);
        }

        let reply = self.resolve(request.method(), request.url());
        debug!("serve"; "{} {} {}", request.method(), request.url(), reply.status());

        match reply {
            Reply::Asset(file) => response::respond_file(request, &file),
            Reply::Page(_, html) => response::respond_page(request, html),
            Reply::RenderFailed(e) => {
                log!("error"; "{}: {}", e, e.source);
                response::respond_render_error(request, &e)
            }
            Reply::NotFound => response::respond_not_found(request),
            Reply::MethodNotAllowed => response::respond_method_not_allowed(request),
        }
    }
}

/// Start the live server (blocking until Ctrl+C).
pub fn serve_site(config: &SiteConfig) -> Result<()> {
    let bindings = crate::cli::common::collect_bindings(config)?;
    let renderer = TemplateRenderer::reloading(&config.site.templates);
    let site = LiveSite::new(bindings, renderer, config.assets.clone());

    if site.routes().is_empty() {
        log!("serve"; "no routes registered, every page request will be 404");
    }

    let (server, addr) = lifecycle::bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);
    register_server(Arc::clone(&server));

    log!("serve"; "{} routes on http://{}", site.routes().len(), addr);

    for request in server.incoming_requests() {
        if let Err(e) = site.handle_request(request) {
            log!("serve"; "request error: {e}");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn binding(url: &str, template: &str, language: Option<&str>) -> PageBinding {
        PageBinding {
            url: url.to_string(),
            template: template.to_string(),
            language: language.map(str::to_string),
            languages: vec!["en".to_string(), "de".to_string()],
        }
    }

    fn site(dir: &TempDir) -> LiveSite<TemplateRenderer> {
        let templates = dir.path().join("templates");
        fs::create_dir_all(templates.join("test2")).unwrap();
        fs::write(templates.join("test2/index.html"), "<p>{{ lang }} {{ url }}</p>").unwrap();
        fs::write(templates.join("broken.html"), "{{ missing(").unwrap();

        let assets_dir = dir.path().join("static");
        fs::create_dir_all(&assets_dir).unwrap();
        fs::write(assets_dir.join("site.css"), "body{}").unwrap();

        let assets = AssetsConfig {
            dir: assets_dir,
            url: "/static".into(),
        };
        LiveSite::new(
            vec![
                binding("/de/test2-de/", "test2/index.html", Some("de")),
                binding("/en/broken", "broken.html", Some("en")),
            ],
            TemplateRenderer::reloading(&templates),
            assets,
        )
    }

    #[test]
    fn test_page_rendered() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);

        match site.resolve(&Method::Get, "/de/test2-de/") {
            Reply::Page(binding, html) => {
                assert_eq!(binding.template, "test2/index.html");
                assert_eq!(html, "<p>de &#x2f;de&#x2f;test2-de&#x2f;</p>");
            }
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(matches!(site.resolve(&Method::Head, "/de/test2-de"), Reply::Page(..)));
    }

    #[test]
    fn test_template_edit_served_without_restart() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);
        let page = |site: &LiveSite<TemplateRenderer>| {
            match site.resolve(&Method::Get, "/de/test2-de/") {
                Reply::Page(_, html) => html,
                other => panic!("unexpected reply: {other:?}"),
            }
        };

        assert_eq!(page(&site), "<p>de &#x2f;de&#x2f;test2-de&#x2f;</p>");
        fs::write(dir.path().join("templates/test2/index.html"), "<h1>{{ lang }}</h1>").unwrap();
        assert_eq!(page(&site), "<h1>de</h1>");
    }

    #[test]
    fn test_asset_served() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);

        match site.resolve(&Method::Get, "/static/site.css?v=2") {
            Reply::Asset(path) => assert!(path.ends_with("site.css")),
            other => panic!("unexpected reply: {other:?}"),
        }
        assert!(matches!(
            site.resolve(&Method::Get, "/static/../templates/broken.html"),
            Reply::NotFound
        ));
        assert!(matches!(site.resolve(&Method::Get, "/static/none.css"), Reply::NotFound));
    }

    #[test]
    fn test_unbound_url_is_not_found() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);

        assert!(matches!(site.resolve(&Method::Get, "/de/test2/"), Reply::NotFound));
        assert!(matches!(site.resolve(&Method::Get, "/"), Reply::NotFound));
    }

    #[test]
    fn test_other_methods_not_allowed() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);

        let reply = site.resolve(&Method::Post, "/de/test2-de/");
        assert!(matches!(reply, Reply::MethodNotAllowed));
        assert_eq!(reply.status(), 405);
    }

    #[test]
    fn test_render_failure_page_is_escaped() {
        let dir = TempDir::new().unwrap();
        let site = site(&dir);

        let Reply::RenderFailed(err) = site.resolve(&Method::Get, "/en/broken") else {
            panic!("expected a render failure");
        };
        assert_eq!(err.template, "broken.html");

        let page = response::render_error_page(&err);
        assert!(page.starts_with("<html><body><h1>Template Error</h1><pre>"));
        assert!(page.contains("failed to render `broken.html`"));
    }
}
