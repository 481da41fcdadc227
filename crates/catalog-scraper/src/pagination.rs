//! "Next page" discovery for the listing.
//!
//! The listing exposes its next page as an anchor inside
//! `<li class="page-item next">`. The URL scheme is never guessed: the
//! crawler only follows what the page links to, resolved against the base
//! URL the crawl started from.

use std::sync::LazyLock;

use scraper::{Html, Selector};

static NEXT_LINK: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("li.page-item.next a").expect("valid next-link selector"));

/// Returns the raw `href` of the next-page anchor, if the page has one.
///
/// An anchor without an `href`, or with a blank one, counts as absent.
#[must_use]
pub fn find_next_href(document: &Html) -> Option<String> {
    let anchor = document.select(&NEXT_LINK).next()?;
    let href = anchor.value().attr("href")?.trim();
    if href.is_empty() {
        return None;
    }
    Some(href.to_owned())
}

/// Resolves a possibly relative `href` against `base_url`.
///
/// # Errors
///
/// Returns a description of the problem when `base_url` is not an absolute
/// URL or the join does not produce a valid one.
pub fn resolve_next_url(base_url: &str, href: &str) -> Result<String, String> {
    let base = reqwest::Url::parse(base_url)
        .map_err(|e| format!("base url {base_url:?} is not absolute: {e}"))?;
    base.join(href)
        .map(String::from)
        .map_err(|e| format!("cannot resolve {href:?} against {base_url}: {e}"))
}
