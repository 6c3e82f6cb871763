//! Template rendering backend.
//!
//! Templates are jinja-style files loaded from the template root by their
//! identifier. Autoescaping is on for `.html`, `.htm` and `.xml` templates.
//!
//! # Variables
//!
//! | Name        | Pages | Entry page | Value                               |
//! |-------------|-------|------------|-------------------------------------|
//! | `language`  | yes   | no         | language code of the page           |
//! | `lang`      | yes   | no         | alias of `language`                 |
//! | `languages` | yes   | yes        | all configured codes, in order      |
//! | `template`  | yes   | yes        | template identifier                 |
//! | `url`       | yes   | yes        | URL the page is served at           |

use std::cell::RefCell;
use std::path::Path;

use minijinja::{Environment, path_loader};
use serde::Serialize;
use thiserror::Error;

use crate::page::PageBinding;

#[derive(Debug, Error)]
#[error("failed to render `{template}`")]
pub struct RenderError {
    pub template: String,
    #[source]
    pub source: minijinja::Error,
}

/// Anything that can turn a page binding into markup.
pub trait Render {
    fn render(&self, binding: &PageBinding) -> Result<String, RenderError>;
}

#[derive(Serialize)]
struct PageContext<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    language: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    lang: Option<&'a str>,
    languages: &'a [String],
    template: &'a str,
    url: &'a str,
}

impl<'a> From<&'a PageBinding> for PageContext<'a> {
    fn from(binding: &'a PageBinding) -> Self {
        let language = binding.language.as_deref();
        Self {
            language,
            lang: language,
            languages: &binding.languages,
            template: &binding.template,
            url: &binding.url,
        }
    }
}

/// Renderer backed by the template directory.
///
/// Loaded templates are cached for the renderer's lifetime unless it was
/// built with [`TemplateRenderer::reloading`], which rereads every template
/// from disk on each render.
pub struct TemplateRenderer {
    env: RefCell<Environment<'static>>,
    reload: bool,
}

impl TemplateRenderer {
    pub fn new(template_dir: &Path) -> Self {
        let mut env = Environment::new();
        env.set_loader(path_loader(template_dir.to_path_buf()));
        Self {
            env: RefCell::new(env),
            reload: false,
        }
    }

    /// Renderer for the live server: template edits show up on the next request.
    pub fn reloading(template_dir: &Path) -> Self {
        Self {
            reload: true,
            ..Self::new(template_dir)
        }
    }
}

impl Render for TemplateRenderer {
    fn render(&self, binding: &PageBinding) -> Result<String, RenderError> {
        let error = |source| RenderError {
            template: binding.template.clone(),
            source,
        };

        if self.reload {
            self.env.borrow_mut().clear_templates();
        }

        let env = self.env.borrow();
        let template = env.get_template(&binding.template).map_err(error)?;
        template.render(PageContext::from(binding)).map_err(error)
    }
}
