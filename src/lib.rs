//! # mdsite
//!
//! A minimal static site generator. Your filesystem is the data source: a
//! directory tree of markdown files renders to the same tree of linked HTML
//! pages, and everything that is not markdown is mirrored alongside,
//! untouched. The goal is to not get in the way of existing file
//! hierarchies — no front matter, no taxonomy config, no site manifest.
//!
//! # Architecture: One Walk, Then Indexes
//!
//! A build is a single sequential depth-first walk over the source tree,
//! followed by one synthesis pass:
//!
//! ```text
//! 1. Walk      source/  →  output/        (render documents, mirror the rest)
//! 2. Indexes   accumulator → index.html   (one listing page per directory)
//! ```
//!
//! During the walk each `.md` file goes through a fixed per-document
//! pipeline — convert → anchor → link-rewrite → template → write — while a
//! per-directory accumulator collects page titles and subdirectory
//! categories. Index synthesis runs strictly after the walk, because a
//! directory's listing is only complete once its whole subtree has been
//! visited.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pipeline`] | The build itself: tree walk, per-directory accumulation, index synthesis |
//! | [`convert`] | Markdown → HTML fragment via pulldown-cmark (GFM extensions) |
//! | [`anchor`] | Slugified, document-unique `id` attributes on every heading |
//! | [`links`] | Relative `.md` hrefs retargeted to `.html` |
//! | [`heading`] | First-`<h1>` extraction for title derivation |
//! | [`render`] | Tera template loading, render payloads, watermark mtime |
//! | [`output`] | Hard-link-or-copy mirroring, fresh page writes, mtime stamping |
//! | [`example`] | `init` scaffolding: a sample content tree and default template |
//!
//! # Design Decisions
//!
//! ## Literal File Names In The Output
//!
//! A source document `guide.md` is written to the output as a file still
//! named `guide.md` — containing HTML. Only hyperlinks between documents get
//! their suffix translated. This keeps the source and output trees 1:1 by
//! relative path, so any file in either tree trivially locates its
//! counterpart in the other.
//!
//! ## Hard Links Over Copies
//!
//! Mirrored files are hard-linked when source and output share a
//! filesystem. Re-runs then skip them entirely (same-inode check), big
//! assets cost no extra disk, and a crash mid-build leaves a tree that the
//! next run completes instead of redoing.
//!
//! ## Watermark mtime
//!
//! Generated pages are stamped with `max(newest template mtime, source
//! document mtime)`. A template edit therefore bumps every page's apparent
//! freshness — downstream tooling that compares mtimes (rsync, cache
//! busting, incremental deploys) sees exactly the set of files whose
//! rendered bytes could have changed.
//!
//! ## Fail Fast, Stay Idempotent
//!
//! The first error aborts the whole build; there is no per-file skip or
//! retry. Partial output is left on disk, and re-running after a fix is
//! cheap because both mirroring and rendering are idempotent.

pub mod anchor;
pub mod convert;
pub mod example;
pub mod heading;
pub mod links;
pub mod output;
pub mod pipeline;
pub mod render;

/// Suffix identifying source documents.
pub const MD_SUFFIX: &str = ".md";
/// Suffix internal hyperlinks are retargeted to.
pub const HTML_SUFFIX: &str = ".html";
