//! The build pipeline: walk, accumulate, synthesize.
//!
//! A build is one streaming depth-first pass over the source tree followed
//! by one synthesis pass over what it accumulated:
//!
//! ```text
//! walk     source/  →  output/   (documents rendered, everything else mirrored)
//! indexes  accumulator → output/<dir>/index.html   (one per directory)
//! ```
//!
//! During the walk every markdown document goes through
//! convert → anchor assignment → link rewriting → template render → write,
//! and its title is recorded in its parent directory's accumulator. Every
//! other regular file is mirrored as-is. After the walk completes — never
//! before, since a directory's listing is only complete once its whole
//! subtree has been visited — each accumulated directory gets a synthesized
//! `index.html`, unless the source tree shipped one of its own.
//!
//! The whole build is sequential and fail-fast: the first error aborts the
//! run, leaving already-written files in place. Re-running is cheap because
//! mirrored files short-circuit on the same-file check in [`crate::output`].

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path;
use std::path::{Path, PathBuf};

use thiserror::Error;
use walkdir::{DirEntry, WalkDir};

use crate::render::{Page, PageMeta, RenderError, Renderer};
use crate::{MD_SUFFIX, anchor, convert, heading, links, output};

/// File name of a synthesized (or hand-authored) directory index.
pub const INDEX_FILE: &str = "index.html";
/// Reserved document whose body seeds its directory's index page.
pub const README_FILE: &str = "README.md";

#[derive(Error, Debug)]
pub enum BuildError {
    #[error("source and output directories cannot be the same")]
    SourceIsOutput,
    #[error("source and templates directories cannot be the same")]
    SourceIsTemplates,
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walking source tree: {0}")]
    Walk(#[from] walkdir::Error),
    #[error(transparent)]
    Render(#[from] RenderError),
    #[error(transparent)]
    Write(#[from] output::WriteError),
}

/// Directories a build reads from and writes to.
pub struct BuildArgs {
    pub source: PathBuf,
    pub output: PathBuf,
    pub templates: PathBuf,
}

impl BuildArgs {
    /// Absolutize all three roots and reject coinciding ones. Runs before
    /// any traversal so a misconfigured build touches nothing.
    fn absolute(&self) -> Result<BuildArgs, BuildError> {
        let source = path::absolute(&self.source)?;
        let output = path::absolute(&self.output)?;
        let templates = path::absolute(&self.templates)?;
        if source == output {
            return Err(BuildError::SourceIsOutput);
        }
        if source == templates {
            return Err(BuildError::SourceIsTemplates);
        }
        Ok(BuildArgs {
            source,
            output,
            templates,
        })
    }
}

/// Counters for the end-of-run summary line.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub pages_rendered: usize,
    pub files_mirrored: usize,
    pub indexes_written: usize,
}

/// Per-destination-directory accumulator, filled during the walk and read
/// exactly once during index synthesis.
#[derive(Default)]
struct DirIndex {
    /// Rendered documents in this directory, in traversal order.
    pages: Vec<PageMeta>,
    /// Child subdirectories that contain documents, in traversal order.
    categories: Vec<PageMeta>,
}

/// Run a full build: render every document under `args.source` into
/// `args.output`, mirror everything else, then synthesize directory indexes.
pub fn build(args: &BuildArgs) -> Result<BuildStats, BuildError> {
    let args = args.absolute()?;
    let renderer = Renderer::load(&args.templates)?;

    let mut dirs: BTreeMap<PathBuf, DirIndex> = BTreeMap::new();
    let mut skip_index: HashSet<PathBuf> = HashSet::new();
    let mut stats = BuildStats::default();

    let output_dir = args.output.clone();
    let templates_dir = args.templates.clone();
    let walker = WalkDir::new(&args.source)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(move |e| keep_entry(e, &output_dir, &templates_dir));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().into_owned();
        if name.starts_with('.') {
            continue;
        }
        let rel = entry.path().strip_prefix(&args.source).unwrap();
        let dst = args.output.join(rel);
        let dst_dir = dst.parent().unwrap().to_path_buf();

        let is_document = name.ends_with(MD_SUFFIX);

        // A document in a non-root directory marks that directory as a
        // subcategory of its parent. Lexical depth-first order keeps one
        // subdirectory's documents contiguous, so checking the most recent
        // category entry is enough to avoid duplicates.
        if is_document && dst_dir != args.output {
            let grandparent = dst_dir.parent().unwrap().to_path_buf();
            let subdir = dst_dir.file_name().unwrap().to_string_lossy().into_owned();
            let index = dirs.entry(grandparent).or_default();
            if index.categories.last().map(|c| c.dest.as_str()) != Some(subdir.as_str()) {
                index.categories.push(PageMeta {
                    title: file_name_to_title(&subdir),
                    dest: subdir,
                    source: None,
                });
            }
        }

        if !is_document {
            if name == INDEX_FILE {
                skip_index.insert(dst_dir.clone());
            }
            output::mirror_file(entry.path(), &dst)?;
            stats.files_mirrored += 1;
            continue;
        }

        let title = render_document(&renderer, entry.path(), &dst)?;
        dirs.entry(dst_dir).or_default().pages.push(PageMeta {
            title,
            dest: name,
            source: Some(entry.path().to_path_buf()),
        });
        stats.pages_rendered += 1;
    }

    for (dir, index) in &dirs {
        if skip_index.contains(dir) {
            continue;
        }
        write_index(&renderer, dir, &index.pages, &index.categories)?;
        stats.indexes_written += 1;
    }

    Ok(stats)
}

/// Walk predicate: prune hidden directories, plus the output and templates
/// roots when they live inside the source tree.
fn keep_entry(entry: &DirEntry, output_dir: &Path, templates_dir: &Path) -> bool {
    if !entry.file_type().is_dir() || entry.depth() == 0 {
        return true;
    }
    if entry.path() == output_dir || entry.path() == templates_dir {
        return false;
    }
    !entry.file_name().to_string_lossy().starts_with('.')
}

/// Render one markdown document from `src` into a full HTML page at `dst`,
/// returning the derived page title.
fn render_document(renderer: &Renderer, src: &Path, dst: &Path) -> Result<String, BuildError> {
    let markdown = fs::read_to_string(src)?;
    let fragment = convert::to_html(&markdown);
    let fragment = anchor::add_anchors(&fragment);
    let fragment = links::rewrite_links(&fragment);

    let mut title = file_name_to_title(&dst.file_name().unwrap().to_string_lossy());
    let first = heading::first_heading(&fragment);
    if !first.is_empty() {
        title = first;
    }

    let page = Page {
        title: &title,
        content: &fragment,
        pages: &[],
        categories: &[],
    };
    let html = renderer.render_page(&page)?;

    let source_mtime = fs::metadata(src)?.modified()?;
    output::write_page(dst, html.as_bytes(), source_mtime, renderer.watermark())?;
    Ok(title)
}

/// Synthesize `dir`'s `index.html` from its accumulated pages and
/// categories.
///
/// The first README entry is pulled out of the page list: its source is
/// re-converted and becomes the index body, and its first heading becomes
/// the index title. Without one, the body is empty and the title falls back
/// to `"<dir base name> index"`.
fn write_index(
    renderer: &Renderer,
    dir: &Path,
    pages: &[PageMeta],
    categories: &[PageMeta],
) -> Result<(), BuildError> {
    let mut readme_html = String::new();
    let mut readme_mtime = None;
    let mut listed = Vec::with_capacity(pages.len());
    for meta in pages {
        if meta.dest != README_FILE || !readme_html.is_empty() {
            listed.push(meta.clone());
            continue;
        }
        let Some(src) = &meta.source else {
            listed.push(meta.clone());
            continue;
        };
        let markdown = fs::read_to_string(src)?;
        readme_html = convert::to_html(&markdown);
        readme_mtime = Some(fs::metadata(src)?.modified()?);
    }

    let mut title = format!(
        "{} index",
        dir.file_name().unwrap_or_default().to_string_lossy()
    );
    if !readme_html.is_empty() {
        let first = heading::first_heading(&readme_html);
        if !first.is_empty() {
            title = first;
        }
    }

    let page = Page {
        title: &title,
        content: &readme_html,
        pages: &listed,
        categories,
    };
    let html = renderer.render_page(&page)?;

    let watermark = renderer.watermark();
    output::write_page(
        &dir.join(INDEX_FILE),
        html.as_bytes(),
        readme_mtime.unwrap_or(watermark),
        watermark,
    )?;
    Ok(())
}

/// Derive a display title from a file or directory name.
///
/// The markdown suffix is stripped; hyphens become spaces only when the
/// stripped name contains no space already — `getting-started.md` reads as
/// "getting started", while `My Notes.md` and `pre-spaced name.md` are kept
/// as written.
pub fn file_name_to_title(name: &str) -> String {
    let stem = name.strip_suffix(MD_SUFFIX).unwrap_or(name);
    if stem.contains(' ') {
        stem.to_string()
    } else {
        stem.replace('-', " ")
    }
}
