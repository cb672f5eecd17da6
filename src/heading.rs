//! First-heading extraction from HTML fragments.
//!
//! Used for title derivation: a rendered document's title is the text of its
//! first `<h1>`, and a directory index seeded by a README takes its title
//! from the README's first heading. A fragment with no `<h1>` is not an
//! error — callers fall back to filename-derived titles.

use scraper::{Html, Selector};

/// Return the text content of the first `<h1>` element in `fragment`, or an
/// empty string if the fragment contains none.
///
/// Text is the concatenation of every text node inside the heading, so
/// inline markup contributes its text but not its tags:
/// `<h1>Header <span>text</span></h1>` yields `"Header text"`.
pub fn first_heading(fragment: &str) -> String {
    let html = Html::parse_fragment(fragment);
    let h1 = Selector::parse("h1").unwrap();
    match html.select(&h1).next() {
        Some(el) => el.text().collect(),
        None => String::new(),
    }
}
