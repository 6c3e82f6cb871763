//! Publish mode: every page binding rendered to a static file.
//!
//! Pipeline phases:
//! - **Collect** - load translations, walk templates, materialize bindings
//! - **Init** - recreate the output directory (with `clean`)
//! - **Write** - render each binding, write it atomically
//! - **Assets** - copy `assets.dir` to `<output><assets.url>`
//! - **Finalize** - per-language summary
//!
//! Bindings are collected before the output directory is touched, so a bad
//! template tree or translation file never wipes a previous publish.

use std::{
    fs,
    io::{self, Write},
    path::{Path, PathBuf},
};

use anyhow::Result;
use jwalk::{Parallelism, WalkDir};
use rustc_hash::{FxHashMap, FxHashSet};
use tempfile::NamedTempFile;
use thiserror::Error;

use crate::{
    config::{AssetsConfig, BuildSectionConfig, SiteConfig},
    debug, log,
    page::{PageBinding, Registrar, emit, output_file_for_url},
    render::{Render, RenderError, TemplateRenderer},
};

/// Marker file written into a freshly cleaned output directory.
const GITKEEP: &str = ".gitkeep";

/// Errors that stop a publish run.
#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to clean output directory `{0}`")]
    Clean(PathBuf, #[source] io::Error),

    #[error("failed to create directory `{0}`")]
    CreateDir(PathBuf, #[source] io::Error),

    #[error("failed to write `{0}`")]
    Write(PathBuf, #[source] io::Error),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("`{0}` does not map to a file inside the output directory")]
    UnsafeUrl(String),

    #[error("failed to read asset directory `{0}`")]
    WalkAssets(PathBuf, #[source] jwalk::Error),

    #[error("failed to copy asset `{0}`")]
    CopyAsset(PathBuf, #[source] io::Error),
}

// ============================================================================
// StaticWriter
// ============================================================================

/// Publish-mode registrar: renders each binding and writes it under the
/// output directory.
pub struct StaticWriter<'a, R> {
    output: &'a Path,
    renderer: &'a R,
    written: FxHashSet<PathBuf>,
    per_language: FxHashMap<Option<String>, usize>,
}

impl<'a, R: Render> StaticWriter<'a, R> {
    pub fn new(output: &'a Path, renderer: &'a R) -> Self {
        Self {
            output,
            renderer,
            written: FxHashSet::default(),
            per_language: FxHashMap::default(),
        }
    }

    /// Number of pages written.
    pub fn written(&self) -> usize {
        self.written.len()
    }

    /// Pages written for `language` (`None` for the entry page).
    pub fn count(&self, language: Option<&str>) -> usize {
        self.per_language
            .get(&language.map(str::to_owned))
            .copied()
            .unwrap_or(0)
    }

    /// `en: 3, de: 3, entry: 1` in configured language order.
    pub fn summary(&self, languages: &[String]) -> String {
        let mut parts: Vec<_> = languages
            .iter()
            .map(|language| format!("{language}: {}", self.count(Some(language))))
            .collect();
        let entry = self.count(None);
        if entry > 0 {
            parts.push(format!("entry: {entry}"));
        }
        parts.join(", ")
    }
}

impl<R: Render> Registrar for StaticWriter<'_, R> {
    type Error = PublishError;

    fn register(&mut self, binding: PageBinding) -> Result<(), PublishError> {
        let file = output_file_for_url(self.output, &binding.url)
            .ok_or_else(|| PublishError::UnsafeUrl(binding.url.clone()))?;
        if self.written.contains(&file) {
            log!("build"; "`{}` is bound twice, skipping `{}`", binding.url, binding.template);
            return Ok(());
        }

        let html = self.renderer.render(&binding)?;
        write_atomic(&file, html.as_bytes())?;

        debug!(
            "build";
            "{} -> {}",
            binding.url,
            file.strip_prefix(self.output).unwrap_or(&file).display()
        );

        *self.per_language.entry(binding.language).or_default() += 1;
        self.written.insert(file);
        Ok(())
    }
}

/// Write through a temporary file in the target directory, then rename.
///
/// Readers never see a partially written page.
fn write_atomic(path: &Path, contents: &[u8]) -> Result<(), PublishError> {
    let dir = path.parent().unwrap_or(Path::new("."));
    fs::create_dir_all(dir).map_err(|e| PublishError::CreateDir(dir.to_path_buf(), e))?;

    let write_err = |e| PublishError::Write(path.to_path_buf(), e);
    let mut tmp = NamedTempFile::new_in(dir).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

// ============================================================================
// Output directory
// ============================================================================

/// Prepare the output directory.
///
/// With `clean`, the directory is removed and recreated, and `.gitkeep` is
/// written when `gitkeep` is set.
pub fn prepare_output(build: &BuildSectionConfig) -> Result<(), PublishError> {
    let output = &build.output;

    if build.clean && output.exists() {
        fs::remove_dir_all(output).map_err(|e| PublishError::Clean(output.clone(), e))?;
    }
    fs::create_dir_all(output).map_err(|e| PublishError::CreateDir(output.clone(), e))?;

    if build.clean && build.gitkeep {
        let gitkeep = output.join(GITKEEP);
        fs::write(&gitkeep, "").map_err(|e| PublishError::Write(gitkeep, e))?;
    }
    Ok(())
}

/// Copy static assets to `<output><assets.url>`. Returns the number of files
/// copied; a missing asset directory copies nothing.
pub fn copy_assets(assets: &AssetsConfig, output: &Path) -> Result<usize, PublishError> {
    if !assets.dir.is_dir() {
        debug!("build"; "no asset directory at {}", assets.dir.display());
        return Ok(0);
    }

    let target = output.join(assets.url_prefix().trim_start_matches('/'));
    let walker = WalkDir::new(&assets.dir)
        .sort(true)
        .skip_hidden(true)
        .parallelism(Parallelism::Serial);

    let mut copied = 0;
    for entry in walker {
        let entry = entry.map_err(|e| PublishError::WalkAssets(assets.dir.clone(), e))?;
        if !entry.file_type().is_file() {
            continue;
        }

        let source = entry.path();
        let Ok(relative) = source.strip_prefix(&assets.dir) else {
            continue;
        };
        let dest = target.join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| PublishError::CreateDir(parent.to_path_buf(), e))?;
        }
        fs::copy(&source, &dest).map_err(|e| PublishError::CopyAsset(source.clone(), e))?;
        copied += 1;
    }
    Ok(copied)
}

// ============================================================================
// Entry point
// ============================================================================

/// Render every page into the output directory.
pub fn publish_site(config: &SiteConfig) -> Result<()> {
    let bindings = super::common::collect_bindings(config)?;

    prepare_output(&config.build)?;

    let renderer = TemplateRenderer::new(&config.site.templates);
    let mut writer = StaticWriter::new(&config.build.output, &renderer);
    emit(bindings, &mut writer)?;

    let assets = copy_assets(&config.assets, &config.build.output)?;

    log!(
        "build";
        "wrote {} pages ({}) and {} assets to {}",
        writer.written(),
        writer.summary(&config.site.languages),
        assets,
        config.root_relative(&config.build.output).display()
    );
    Ok(())
}
