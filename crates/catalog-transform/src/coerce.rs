//! Best-effort conversions from scraped text to typed values.
//!
//! Every function returns `None` instead of failing; the cleaner drops rows
//! with missing values after coercion.

use std::sync::LazyLock;

use regex::Regex;

static LEADING_DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+(?:\.\d*)?)").expect("valid decimal regex"));
static LEADING_INTEGER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)").expect("valid integer regex"));

/// Parses `raw` as a decimal number and multiplies it by `exchange_rate`.
///
/// Non-numeric input, and anything that is not finite after conversion,
/// yields `None`.
#[must_use]
pub fn parse_price(raw: &str, exchange_rate: f64) -> Option<f64> {
    let value = raw.trim().parse::<f64>().ok()?;
    let converted = value * exchange_rate;
    converted.is_finite().then_some(converted)
}

/// Extracts the leading integer or decimal token, e.g. `"4.5 / 5"` → `4.5`.
#[must_use]
pub fn parse_rating(raw: &str) -> Option<f64> {
    let captures = LEADING_DECIMAL.captures(raw)?;
    captures[1].parse::<f64>().ok()
}

/// Extracts the leading integer token, e.g. `"3 Colors"` → `3`.
#[must_use]
pub fn parse_colors(raw: &str) -> Option<i64> {
    let captures = LEADING_INTEGER.captures(raw)?;
    captures[1].parse::<i64>().ok()
}
