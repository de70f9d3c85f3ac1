//! Lenient numeric parsing for scraped values.
//!
//! Prices arrive as `"$1,299.99"` and review counts as `"12,345 ratings"`.
//! Both go through [`numeric_text`], which strips currency symbols, grouping
//! separators and rating-count suffixes. Failure semantics differ per caller:
//! a price that still does not parse is reported as `None`, a review count
//! falls back to zero.

use serde::{Deserialize, Serialize};

const CURRENCY_SYMBOLS: [char; 5] = ['$', '€', '£', '¥', '₹'];
const COUNT_SUFFIXES: [&str; 2] = ["ratings", "rating"];

/// A value that may be given either as a JSON number or as formatted text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    /// A plain number.
    Number(f64),
    /// A formatted string such as `"$24.99"` or `"1,234 ratings"`.
    Text(String),
}

impl From<f64> for NumberOrText {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<u64> for NumberOrText {
    #[allow(clippy::cast_precision_loss)]
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<&str> for NumberOrText {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl std::fmt::Display for NumberOrText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Strips currency symbols, grouping separators and count suffixes.
#[must_use]
pub fn numeric_text(raw: &str) -> String {
    let mut cleaned: String = raw
        .chars()
        .filter(|c| *c != ',' && !CURRENCY_SYMBOLS.contains(c))
        .collect();
    for suffix in COUNT_SUFFIXES {
        cleaned = cleaned.replace(suffix, "");
    }
    cleaned.trim().to_string()
}

/// Parses a price string, returning `None` when nothing numeric remains.
#[must_use]
pub fn parse_price(raw: &str) -> Option<f64> {
    numeric_text(raw).parse::<f64>().ok().filter(|p| p.is_finite())
}

/// Parses a review count string; anything that is not a whole number is zero.
#[must_use]
pub fn parse_review_count(raw: &str) -> u64 {
    numeric_text(raw).parse::<u64>().unwrap_or(0)
}

/// Price of an optional field. A missing price counts as zero.
#[must_use]
pub fn price_value(value: Option<&NumberOrText>) -> Option<f64> {
    match value {
        None => Some(0.0),
        Some(NumberOrText::Number(n)) => Some(*n),
        Some(NumberOrText::Text(s)) => parse_price(s),
    }
}

/// Review count of an optional field, with failure-to-zero semantics.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn review_count_value(value: Option<&NumberOrText>) -> u64 {
    match value {
        None => 0,
        Some(NumberOrText::Number(n)) if n.is_finite() && *n > 0.0 => *n as u64,
        Some(NumberOrText::Number(_)) => 0,
        Some(NumberOrText::Text(s)) => parse_review_count(s),
    }
}
