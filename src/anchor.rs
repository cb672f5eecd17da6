//! Heading anchor assignment.
//!
//! Parses an HTML fragment and gives every `h1`–`h6` element a slugified,
//! document-unique `id` attribute so rendered pages can be deep-linked with
//! `#fragment` URLs. Uniqueness is scoped to one fragment: each call starts
//! with a fresh seen-set, and colliding slugs get `-1`, `-2`, … suffixes in
//! document order.

use std::collections::HashSet;

use html5ever::{QualName, local_name, namespace_url, ns};
use scraper::node::Element;
use scraper::{ElementRef, Html, Node};

/// Tags that receive an anchor id.
const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

/// Parse `fragment` as the content of a block container, assign a unique
/// slugified `id` to every heading element, and re-serialize the fragment.
///
/// An existing `id` attribute is overwritten, never duplicated, so running
/// the assigner over its own output is safe. Serialization may normalize
/// attribute quoting; everything else round-trips.
pub fn add_anchors(fragment: &str) -> String {
    let mut html = Html::parse_fragment(fragment);

    let mut seen: HashSet<String> = HashSet::new();
    let mut assignments = Vec::new();
    for node in html.tree.root().descendants() {
        let Some(el) = ElementRef::wrap(node) else {
            continue;
        };
        if !HEADING_TAGS.contains(&el.value().name()) {
            continue;
        }
        // Headings cannot nest, so the whole subtree is this heading's text.
        let text: String = el.text().collect();
        let Some(slug) = claim_slug(&mut seen, slugify(&text)) else {
            // All suffix probes taken: leave the element untouched.
            continue;
        };
        assignments.push((node.id(), slug));
    }

    let id_attr = QualName::new(None, ns!(), local_name!("id"));
    for (node_id, slug) in assignments {
        if let Some(mut node) = html.tree.get_mut(node_id)
            && let Node::Element(el) = node.value()
        {
            set_attr(el, &id_attr, &slug);
        }
    }

    html.root_element().inner_html()
}

/// Set `name` to `value` on a parsed element, overwriting an existing
/// attribute in place. The attribute list is a plain `Vec`, so a bare push
/// would duplicate the entry instead of replacing it.
pub(crate) fn set_attr(el: &mut Element, name: &QualName, value: &str) {
    for (n, v) in el.attrs.iter_mut() {
        if *n == *name {
            *v = value.into();
            return;
        }
    }
    el.attrs.push((name.clone(), value.into()));
}

/// Register `slug` in `seen`, probing `-1` through `-99` suffixes on
/// collision. Returns the claimed slug, or `None` when every probe is
/// already taken.
fn claim_slug(seen: &mut HashSet<String>, slug: String) -> Option<String> {
    if seen.insert(slug.clone()) {
        return Some(slug);
    }
    for i in 1..100 {
        let candidate = format!("{slug}-{i}");
        if seen.insert(candidate.clone()) {
            return Some(candidate);
        }
    }
    None
}

/// Slugify heading text: lowercase, alphanumeric runs kept, everything else
/// collapsed into single `-` separators, leading and trailing separators
/// dropped.
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_sep = false;
    for c in text.chars() {
        if c.is_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_sep = true;
        }
    }
    slug
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Some header"), "some-header");
    }

    #[test]
    fn slugify_collapses_punctuation_runs() {
        assert_eq!(slugify("What? -- Why!"), "what-why");
    }

    #[test]
    fn slugify_trims_separators() {
        assert_eq!(slugify("  spaced out  "), "spaced-out");
    }

    #[test]
    fn slugify_keeps_digits() {
        assert_eq!(slugify("Step 2: profit"), "step-2-profit");
    }

    #[test]
    fn slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn single_heading_gets_id() {
        let out = add_anchors("<h2>some header</h2>");
        assert_eq!(out, r#"<h2 id="some-header">some header</h2>"#);
    }

    #[test]
    fn colliding_headings_get_suffixed_ids() {
        let body = r#"<h1 class="foo">Some <span>header</span></h1><p>Text</p><h2>some header</h2>"#;
        let out = add_anchors(body);
        assert!(out.contains(r#"id="some-header""#), "got: {out}");
        assert!(out.contains(r#"id="some-header-1""#), "got: {out}");
        assert!(out.contains(r#"class="foo""#), "got: {out}");
        assert!(out.contains("<p>Text</p>"), "got: {out}");
    }

    #[test]
    fn three_identical_headings() {
        let out = add_anchors("<h2>Dup</h2><h3>Dup</h3><h4>Dup</h4>");
        assert!(out.contains(r#"<h2 id="dup">"#));
        assert!(out.contains(r#"<h3 id="dup-1">"#));
        assert!(out.contains(r#"<h4 id="dup-2">"#));
    }

    #[test]
    fn heading_text_includes_nested_markup_text() {
        let out = add_anchors("<h1>Deep <em>nested <code>text</code></em></h1>");
        assert!(out.contains(r#"id="deep-nested-text""#), "got: {out}");
    }

    #[test]
    fn existing_id_is_overwritten_not_duplicated() {
        let out = add_anchors(r#"<h1 id="old">New Title</h1>"#);
        assert!(out.contains(r#"id="new-title""#), "got: {out}");
        assert!(!out.contains("old"), "got: {out}");
        assert_eq!(out.matches("id=").count(), 1, "got: {out}");
    }

    #[test]
    fn idempotent_on_own_output() {
        let once = add_anchors("<h1>Title</h1><h2>Title</h2><p>body</p>");
        let twice = add_anchors(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn claim_slug_returns_none_once_all_probes_are_taken() {
        let mut seen = HashSet::new();
        seen.insert("dup".to_string());
        for i in 1..100 {
            seen.insert(format!("dup-{i}"));
        }
        assert_eq!(claim_slug(&mut seen, "dup".to_string()), None);
        // Other slugs are unaffected by the exhausted family.
        assert_eq!(
            claim_slug(&mut seen, "other".to_string()),
            Some("other".to_string())
        );
    }

    #[test]
    fn heading_past_last_probe_keeps_no_id() {
        let body: String = std::iter::repeat_n("<h2>Dup</h2>", 101).collect();
        let out = add_anchors(&body);
        // Base slug plus 99 suffixes cover the first hundred headings.
        assert_eq!(out.matches("id=").count(), 100, "got: {out}");
        assert!(out.contains(r#"id="dup-99""#), "got: {out}");
        assert!(out.contains("<h2>Dup</h2>"), "got: {out}");
    }

    #[test]
    fn non_heading_content_passes_through() {
        let out = add_anchors("<p>hello <a href=\"x.md\">link</a></p>");
        assert!(out.contains("hello"));
        assert!(out.contains(r#"href="x.md""#));
        assert!(!out.contains("id="));
    }

    #[test]
    fn top_level_text_is_legal() {
        let out = add_anchors("loose text<h6>end</h6>");
        assert!(out.starts_with("loose text"));
        assert!(out.contains(r#"<h6 id="end">end</h6>"#));
    }
}
