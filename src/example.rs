//! Example content scaffolding.
//!
//! Backs the `init` subcommand: writes a small markdown tree plus a default
//! Tera template so a new project renders something immediately. Every file
//! is created with `create_new` semantics — existing files are never
//! overwritten, so running `init` inside a real project is safe.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::render::PAGE_TEMPLATE;

#[derive(Error, Debug)]
pub enum ExampleError {
    #[error("source and templates directories cannot be the same")]
    SourceIsTemplates,
    #[error("refusing to overwrite {0}")]
    AlreadyExists(PathBuf),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// `(relative path, contents)` pairs of the example content tree.
const EXAMPLE_CONTENT: &[(&str, &str)] = &[
    ("README.md", README_MD),
    ("getting-started.md", GETTING_STARTED_MD),
    ("guides/README.md", GUIDES_README_MD),
    ("guides/anchors.md", GUIDES_ANCHORS_MD),
    ("style.css", STYLE_CSS),
];

/// Write the example content tree into `source_dir` and the default
/// template into `templates_dir`, failing instead of overwriting.
pub fn generate(source_dir: &Path, templates_dir: &Path) -> Result<(), ExampleError> {
    if source_dir == templates_dir {
        return Err(ExampleError::SourceIsTemplates);
    }
    for (rel, contents) in EXAMPLE_CONTENT {
        write_if_missing(&source_dir.join(rel), contents)?;
    }
    write_if_missing(&templates_dir.join(PAGE_TEMPLATE), DEFAULT_TEMPLATE)
}

/// Create `dst` (and parent directories) with `contents`, erroring if the
/// file already exists.
fn write_if_missing(dst: &Path, contents: &str) -> Result<(), ExampleError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = match fs::OpenOptions::new().write(true).create_new(true).open(dst) {
        Ok(f) => f,
        Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
            return Err(ExampleError::AlreadyExists(dst.to_path_buf()));
        }
        Err(e) => return Err(e.into()),
    };
    file.write_all(contents.as_bytes())?;
    Ok(())
}

const README_MD: &str = "\
# Example site

This directory renders to a static site. Markdown files become HTML pages,
everything else is mirrored as-is, and each directory gets an `index.html`
listing its pages and subdirectories.

Start with [getting started](getting-started.md), or browse the guides.
";

const GETTING_STARTED_MD: &str = "\
# Getting started

Run the build and open the output directory in a browser:

```
mdsite build --source . --output output --templates templates
```

A `README.md` seeds its directory's index page, like the one you are
probably reading right now.
";

const GUIDES_README_MD: &str = "\
# Guides

Longer-form documentation lives here. Each file below is listed on this
index automatically.
";

const GUIDES_ANCHORS_MD: &str = "\
# Heading anchors

Every heading gets a stable, slugified `id`, so deep links like
[#heading-anchors](anchors.md#heading-anchors) keep working after a rebuild.

## Heading anchors

Duplicate headings are suffixed `-1`, `-2`, and so on.
";

const STYLE_CSS: &str = "\
body {
    max-width: 45rem;
    margin: 2rem auto;
    padding: 0 1rem;
    font-family: system-ui, sans-serif;
    line-height: 1.5;
}
nav ul {
    padding-left: 1.2rem;
}
";

const DEFAULT_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<link rel="stylesheet" href="/style.css">
<title>{{ title }}</title>
</head>
<body>
<main>{{ content | safe }}</main>
{% if categories %}<nav>
<h2>Categories</h2>
<ul>
{% for category in categories %}<li><a href="{{ category.dest }}/">{{ category.title }}</a></li>
{% endfor %}</ul>
</nav>{% endif %}
{% if pages %}<nav>
<h2>Pages</h2>
<ul>
{% for page in pages %}<li><a href="{{ page.dest }}">{{ page.title }}</a></li>
{% endfor %}</ul>
</nav>{% endif %}
</body>
</html>
"#;
