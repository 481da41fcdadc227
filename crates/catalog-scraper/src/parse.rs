//! Product card extraction from listing HTML.
//!
//! Each optional field is produced by its own extractor returning
//! `Result<String, FieldError>`; the results are merged into a
//! [`RawProductRecord`] at the end, so a failing field only nulls itself.
//! The title is the one required field: without it the card is skipped.

use std::sync::LazyLock;

use catalog_core::{Column, RawProductRecord};
use scraper::{ElementRef, Html, Selector};

use crate::error::{FieldError, ParseError};
use crate::pagination::find_next_href;

const STAR_GLYPH: char = '\u{2b50}';

const RATING_MARKER: &str = "Rating:";
const COLORS_MARKER: &str = "Colors";
const SIZE_MARKER: &str = "Size:";
const GENDER_MARKER: &str = "Gender:";

static CARD: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.product-details").expect("valid card selector"));
static TITLE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h3.product-title").expect("valid title selector"));
static PRICE_CONTAINER: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("div.price-container").expect("valid price selector"));
static PRICE: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("span.price").expect("valid price selector"));
static PARAGRAPH: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p").expect("valid paragraph selector"));

type FieldResult = Result<String, FieldError>;

/// Everything the crawler needs from one listing page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListingPage {
    /// Parsed cards in document order, without timestamps.
    pub records: Vec<RawProductRecord>,
    /// Raw `href` of the "next page" link, unresolved.
    pub next_href: Option<String>,
}

/// Parses a full listing page: every product card plus the next-page link.
///
/// Cards without a title are logged and skipped. Each card is parsed inside
/// a `card` span carrying `page` and the card's index on the page.
#[must_use]
pub fn parse_listing_page(html: &str, page: usize) -> ListingPage {
    let document = Html::parse_document(html);

    let mut records = Vec::new();
    for (index, card) in document.select(&CARD).enumerate() {
        let _card = tracing::warn_span!("card", page, card_index = index).entered();
        match parse_card(card) {
            Ok(record) => records.push(record),
            Err(err) => tracing::warn!(error = %err, "skipping product card"),
        }
    }

    ListingPage {
        records,
        next_href: find_next_href(&document),
    }
}

/// Parses the markup of a single product card.
///
/// Accepts either the card element itself or any fragment containing it;
/// when no `div.product-details` element is present the whole fragment is
/// treated as the card.
///
/// # Errors
///
/// Returns [`ParseError::MissingTitle`] when the card has no title element.
pub fn parse_product_card(markup: &str) -> Result<RawProductRecord, ParseError> {
    let fragment = Html::parse_fragment(markup);
    let card = fragment
        .select(&CARD)
        .next()
        .unwrap_or_else(|| fragment.root_element());
    parse_card(card)
}

/// Parses a product card element into a raw record.
///
/// # Errors
///
/// Returns [`ParseError::MissingTitle`] when the card has no title element.
pub fn parse_card(card: ElementRef<'_>) -> Result<RawProductRecord, ParseError> {
    let title = extract_title(card)?;

    Ok(RawProductRecord {
        title: Some(title),
        price: settle(Column::Price, extract_price(card)),
        rating: settle(Column::Rating, extract_rating(card)),
        colors: settle(Column::Colors, extract_colors(card)),
        size: settle(Column::Size, extract_size(card)),
        gender: settle(Column::Gender, extract_gender(card)),
        timestamp: None,
    })
}

/// Converts a field result to an optional value, warning on failure.
fn settle(column: Column, result: FieldResult) -> Option<String> {
    match result {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(field = %column, error = %err, "field extraction failed");
            None
        }
    }
}

fn extract_title(card: ElementRef<'_>) -> Result<String, ParseError> {
    card.select(&TITLE)
        .next()
        .map(|node| text_of(node).trim().to_owned())
        .ok_or(ParseError::MissingTitle)
}

fn extract_price(card: ElementRef<'_>) -> FieldResult {
    let container = card
        .select(&PRICE_CONTAINER)
        .next()
        .ok_or(FieldError::NotFound("price container"))?;
    let price = container
        .select(&PRICE)
        .next()
        .ok_or(FieldError::NotFound("price element"))?;

    let text = text_of(price);
    let text = text.trim();
    let value = text.strip_prefix('$').unwrap_or(text).trim();
    non_empty(value, "price")
}

fn extract_rating(card: ElementRef<'_>) -> FieldResult {
    let line = find_marker_line(card, RATING_MARKER)?;
    let after_marker = match line.rsplit_once(STAR_GLYPH) {
        Some((_, rest)) => rest,
        None => line
            .split_once(RATING_MARKER)
            .map_or(line.as_str(), |(_, rest)| rest),
    };
    let value = after_marker
        .split('/')
        .next()
        .unwrap_or(after_marker)
        .trim();
    non_empty(value, "rating")
}

fn extract_colors(card: ElementRef<'_>) -> FieldResult {
    let line = find_marker_line(card, COLORS_MARKER)?;
    line.split_whitespace()
        .next()
        .map(str::to_owned)
        .ok_or_else(|| FieldError::Malformed(format!("no token in {line:?}")))
}

fn extract_size(card: ElementRef<'_>) -> FieldResult {
    let line = find_marker_line(card, SIZE_MARKER)?;
    non_empty(line.replace(SIZE_MARKER, "").trim(), "size")
}

fn extract_gender(card: ElementRef<'_>) -> FieldResult {
    let line = find_marker_line(card, GENDER_MARKER)?;
    non_empty(line.replace(GENDER_MARKER, "").trim(), "gender")
}

/// Returns the trimmed text of the first paragraph containing `marker`.
fn find_marker_line(card: ElementRef<'_>, marker: &'static str) -> FieldResult {
    card.select(&PARAGRAPH)
        .map(text_of)
        .find(|text| text.contains(marker))
        .map(|text| text.trim().to_owned())
        .ok_or(FieldError::NotFound(marker))
}

fn non_empty(value: &str, what: &str) -> FieldResult {
    if value.is_empty() {
        Err(FieldError::Malformed(format!("empty {what}")))
    } else {
        Ok(value.to_owned())
    }
}

fn text_of(element: ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
#[path = "parse_test.rs"]
mod tests;
