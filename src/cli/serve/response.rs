//! HTTP response handlers.

use crate::render::RenderError;
use crate::utils::mime::types::{HTML, PLAIN};
use anyhow::{Context, Result, anyhow};
use std::{fs, path::Path};
use tiny_http::{Header, Method, Request, Response, StatusCode};

/// Respond with a static asset.
pub fn respond_file(request: Request, path: &Path) -> Result<()> {
    let content_type = crate::utils::mime::from_path(path);

    if is_head_request(&request) {
        return send_head(request, 200, content_type);
    }

    let body = fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    send_body(request, 200, content_type, body)
}

/// Respond with a rendered page.
pub fn respond_page(request: Request, html: String) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 200, HTML);
    }
    send_body(request, 200, HTML, html.into_bytes())
}

/// Respond with a plain 404.
pub fn respond_not_found(request: Request) -> Result<()> {
    if is_head_request(&request) {
        return send_head(request, 404, PLAIN);
    }
    send_body(request, 404, PLAIN, b"404 Not Found".to_vec())
}

/// Respond with 405 for anything but `GET`/`HEAD`.
pub fn respond_method_not_allowed(request: Request) -> Result<()> {
    let response = Response::from_data(b"405 Method Not Allowed".to_vec())
        .with_status_code(StatusCode(405))
        .with_header(make_header("Content-Type", PLAIN)?)
        .with_header(make_header("Allow", "GET, HEAD")?);
    request.respond(response)?;
    Ok(())
}

/// Respond with 503 Service Unavailable (server shutting down).
pub fn respond_unavailable(request: Request) -> Result<()> {
    send_body(request, 503, PLAIN, b"503 Service Unavailable".to_vec())
}

/// Respond with the render failure (500), error chain escaped.
pub fn respond_render_error(request: Request, error: &RenderError) -> Result<()> {
    let body = render_error_page(error);
    send_body(request, 500, HTML, body.into_bytes())
}

/// HTML body for a failed render.
pub fn render_error_page(error: &RenderError) -> String {
    let error_str = format!("{error}: {:#}", error.source);
    let msg = crate::utils::html::escape(&error_str);
    format!("<html><body><h1>Template Error</h1><pre>{msg}</pre></body></html>")
}

/// Is this a `GET` or `HEAD` request.
pub fn is_read_method(method: &Method) -> bool {
    matches!(method, Method::Get | Method::Head)
}

fn is_head_request(request: &Request) -> bool {
    request.method() == &Method::Head
}

fn send_head(request: Request, status: u16, content_type: &'static str) -> Result<()> {
    let response =
        Response::empty(StatusCode(status)).with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn send_body(
    request: Request,
    status: u16,
    content_type: &'static str,
    body: Vec<u8>,
) -> Result<()> {
    let response = Response::from_data(body)
        .with_status_code(StatusCode(status))
        .with_header(make_header("Content-Type", content_type)?);
    request.respond(response)?;
    Ok(())
}

fn make_header(key: &'static str, value: &'static str) -> Result<Header> {
    Header::from_bytes(key, value).map_err(|()| anyhow!("invalid header `{key}: {value}`"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_methods() {
        assert!(is_read_method(&Method::Get));
        assert!(is_read_method(&Method::Head));
        assert!(!is_read_method(&Method::Post));
        assert!(!is_read_method(&Method::Delete));
    }

    #[test]
    fn test_headers_are_valid() {
        assert!(make_header("Content-Type", HTML).is_ok());
        assert!(make_header("Allow", "GET, HEAD").is_ok());
    }
}
