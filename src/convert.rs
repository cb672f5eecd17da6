//! Markdown to HTML conversion.
//!
//! Thin wrapper around `pulldown-cmark` with GitHub-flavored extensions
//! enabled. The output is a block-level HTML fragment — content suitable for
//! embedding inside a `<div>` or `<article>` element, never a full document.
//! Everything downstream (anchor assignment, link rewriting, heading
//! extraction) consumes this fragment without caring how it was produced.

use pulldown_cmark::{Options, Parser, html};

/// Convert markdown source to an HTML block fragment.
///
/// Tables, footnotes, strikethrough, task lists, and smart punctuation are
/// enabled, matching what readers expect from GitHub-rendered markdown.
pub fn to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_SMART_PUNCTUATION;
    let parser = Parser::new_ext(markdown, options);
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_heading_and_paragraph() {
        let html = to_html("# Title\n\nSome text.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<p>Some text.</p>"));
    }

    #[test]
    fn output_is_a_fragment_not_a_document() {
        let html = to_html("plain paragraph");
        assert!(!html.contains("<html"));
        assert!(!html.contains("<body"));
    }

    #[test]
    fn relative_links_survive_conversion() {
        let html = to_html("[next](chapter-2.md)");
        assert!(html.contains(r#"<a href="chapter-2.md">next</a>"#));
    }

    #[test]
    fn tables_are_enabled() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn strikethrough_is_enabled() {
        let html = to_html("~~gone~~");
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn empty_input_gives_empty_fragment() {
        assert_eq!(to_html(""), "");
    }
}
