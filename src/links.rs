//! Internal hyperlink rewriting.
//!
//! Rendered documents keep their source file names on disk (`guide.md` stays
//! `guide.md` in the output tree), but a markdown link like
//! `[next](chapter-2.md)` should point at the rendered page. This module
//! rewrites same-site relative `href`s ending in the markdown suffix to end
//! in the HTML suffix, leaving every absolute or external link untouched.

use html5ever::{QualName, local_name, namespace_url, ns};
use scraper::{ElementRef, Html, Node};
use url::Url;

use crate::{HTML_SUFFIX, MD_SUFFIX};

/// Rewrite relative markdown links in an HTML fragment.
///
/// Fragments that do not contain the markdown suffix at all are returned
/// unchanged without parsing — callers see identical bytes. Otherwise the
/// fragment is parsed, every `<a href>` pointing at a same-site path ending
/// in the markdown suffix is retargeted, and the fragment re-serialized.
pub fn rewrite_links(fragment: &str) -> String {
    if !fragment.contains(MD_SUFFIX) {
        return fragment.to_string();
    }
    let mut html = Html::parse_fragment(fragment);

    let mut edits = Vec::new();
    for node in html.tree.root().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if el.value().name() != "a" {
            continue;
        }
        let Some(href) = el.value().attr("href") else {
            continue;
        };
        if let Some(rewritten) = rewrite_href(href) {
            edits.push((node.id(), rewritten));
        }
    }

    let href_attr = QualName::new(None, ns!(), local_name!("href"));
    for (node_id, value) in edits {
        if let Some(mut node) = html.tree.get_mut(node_id)
            && let Node::Element(el) = node.value()
        {
            crate::anchor::set_attr(el, &href_attr, &value);
        }
    }

    html.root_element().inner_html()
}

/// Rewrite a single `href` value, or `None` when it must be left alone.
///
/// Only plain relative or absolute-path references within the same site
/// qualify: anything with an explicit scheme, an explicit host (including
/// scheme-relative `//host/...` forms), or that fails to parse as a URI
/// reference stays untouched. Query and fragment parts are preserved.
fn rewrite_href(href: &str) -> Option<String> {
    match Url::parse(href) {
        // Parses standalone, so it carries a scheme: external.
        Ok(_) => return None,
        Err(url::ParseError::RelativeUrlWithoutBase) => {}
        Err(_) => return None,
    }
    // Scheme-relative references name an explicit host.
    if href.starts_with("//") {
        return None;
    }
    let (rest, fragment) = match href.split_once('#') {
        Some((r, f)) => (r, Some(f)),
        None => (href, None),
    };
    let (path, query) = match rest.split_once('?') {
        Some((p, q)) => (p, Some(q)),
        None => (rest, None),
    };
    let stem = path.strip_suffix(MD_SUFFIX)?;

    let mut out = String::with_capacity(href.len() + HTML_SUFFIX.len());
    out.push_str(stem);
    out.push_str(HTML_SUFFIX);
    if let Some(q) = query {
        out.push('?');
        out.push_str(q);
    }
    if let Some(f) = fragment {
        out.push('#');
        out.push_str(f);
    }
    Some(out)
}
