//! Text normalization for source fragments.
//!
//! Trims and collapses whitespace and, when enabled, strips wiki-link
//! markup (`[[target]]` becomes `target`) before fragments are assembled.

use once_cell::sync::Lazy;
use regex::Regex;
use std::borrow::Cow;

/// Runs of horizontal whitespace. Newlines are not part of the class.
static HORIZONTAL_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[ \t]+").unwrap());

/// `[[inner]]` where inner is one or more non-`]` characters.
static WIKI_LINK: Lazy<Regex> = Lazy::new(|| Regex::new(r"\[\[([^\]]+)\]\]").unwrap());

/// Normalizes a raw fragment.
///
/// Strips wiki links if `strip_links` is set, then trims leading and trailing
/// whitespace and collapses runs of spaces and tabs into a single space.
/// Newlines inside the content are preserved.
#[must_use]
pub fn normalize(text: &str, strip_links: bool) -> String {
    if strip_links {
        collapse_whitespace(&strip_wiki_links(text))
    } else {
        collapse_whitespace(text)
    }
}

/// Trims the text and collapses each run of spaces and tabs to one space.
#[must_use]
pub fn collapse_whitespace(text: &str) -> String {
    HORIZONTAL_SPACE.replace_all(text.trim(), " ").into_owned()
}

/// Replaces every `[[inner]]` with `inner`.
///
/// The first `]` ends the inner text, so `[[a [b] c]]` and `[[]]` are left
/// untouched. Markup uncovered by a replacement is stripped as well, so
/// `[[[[a]]]]` becomes `a` and the result never contains a link.
#[must_use]
pub fn strip_wiki_links(text: &str) -> String {
    let mut out = text.to_owned();
    loop {
        let next = match WIKI_LINK.replace_all(&out, "$1") {
            Cow::Borrowed(_) => return out,
            Cow::Owned(next) => next,
        };
        out = next;
    }
}

/// Counts whitespace-delimited words.
#[inline]
#[must_use]
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}
