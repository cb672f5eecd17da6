//! Template rendering.
//!
//! Wraps a [Tera](https://keats.github.io/tera/) instance loaded from
//! `<templates>/*.html`. Every page — rendered document or synthesized
//! directory index — goes through the single `default.html` template with a
//! [`Page`] payload.
//!
//! Loading also records the **watermark mtime**: the newest modification
//! time across all template files. Generated output is never stamped older
//! than the watermark, so editing a template makes every page look fresh to
//! mtime-based tooling even though page content did not change.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use serde::Serialize;
use tera::Tera;
use thiserror::Error;

/// Template every page is rendered with.
pub const PAGE_TEMPLATE: &str = "default.html";

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("template error: {0}")]
    Template(#[from] tera::Error),
    #[error("no {PAGE_TEMPLATE} template in {0}")]
    MissingTemplate(PathBuf),
    #[error("templates directory path is not valid UTF-8: {0}")]
    NonUtf8Path(PathBuf),
}

/// One entry of a directory index: a rendered document or a subcategory.
///
/// `source` is kept only for document entries so the index synthesizer can
/// read a designated README body later; it is an internal bookkeeping field
/// and never reaches the template.
#[derive(Debug, Clone, Serialize)]
pub struct PageMeta {
    /// Display title.
    pub title: String,
    /// Destination file or directory base name, usable as a relative href.
    pub dest: String,
    /// Source document path; `None` for subcategory entries.
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// Render payload handed to the template.
///
/// `pages` and `categories` are populated only for synthesized directory
/// indexes; ordinary documents render with both empty.
#[derive(Debug, Serialize)]
pub struct Page<'a> {
    pub title: &'a str,
    /// HTML fragment; templates must emit it with the `safe` filter.
    pub content: &'a str,
    pub pages: &'a [PageMeta],
    pub categories: &'a [PageMeta],
}

/// Tera instance plus the watermark mtime of its template sources.
pub struct Renderer {
    tera: Tera,
    watermark: SystemTime,
}

impl Renderer {
    /// Load all `*.html` templates from `templates_dir` and compute the
    /// watermark mtime over the same files.
    pub fn load(templates_dir: &Path) -> Result<Self, RenderError> {
        let pattern = templates_dir.join("*.html");
        let pattern = pattern
            .to_str()
            .ok_or_else(|| RenderError::NonUtf8Path(templates_dir.to_path_buf()))?;
        let tera = Tera::new(pattern)?;
        if !tera.get_template_names().any(|n| n == PAGE_TEMPLATE) {
            return Err(RenderError::MissingTemplate(templates_dir.to_path_buf()));
        }
        let watermark = latest_mtime(templates_dir)?;
        Ok(Renderer { tera, watermark })
    }

    /// Render `page` through the page template into full-document HTML.
    pub fn render_page(&self, page: &Page) -> Result<String, RenderError> {
        let context = tera::Context::from_serialize(page)?;
        Ok(self.tera.render(PAGE_TEMPLATE, &context)?)
    }

    /// Newest modification time among the loaded template sources.
    pub fn watermark(&self) -> SystemTime {
        self.watermark
    }
}

/// Latest modification time across `*.html` files in `dir`.
fn latest_mtime(dir: &Path) -> Result<SystemTime, RenderError> {
    let mut latest = UNIX_EPOCH;
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if !path.is_file() || path.extension().is_none_or(|e| e != "html") {
            continue;
        }
        let mtime = fs::metadata(&path)?.modified()?;
        if mtime > latest {
            latest = mtime;
        }
    }
    Ok(latest)
}
