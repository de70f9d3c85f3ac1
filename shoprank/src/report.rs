//! Rendering of extraction and ranking results.

use crate::errors::ShoprankError;
use crate::normalize::NumberOrText;
use crate::ranking::{Priority, ScoredProduct};
use crate::snapshot::ProductCandidate;

const SUMMARY_ITEMS: usize = 3;

/// Renders candidates as a pretty-printed JSON array.
pub fn candidates_json(candidates: &[ProductCandidate]) -> Result<String, ShoprankError> {
    Ok(serde_json::to_string_pretty(candidates)?)
}

/// Renders candidates as `identifier<TAB>name` lines.
#[must_use]
pub fn candidates_tsv(candidates: &[ProductCandidate]) -> String {
    candidates
        .iter()
        .map(|c| c.to_tsv() + "\n")
        .collect()
}

/// Renders ranked products as a JSON array, scores included.
pub fn ranked_json(ranked: &[ScoredProduct], top: usize) -> Result<String, ShoprankError> {
    let shown = &ranked[..top.min(ranked.len())];
    Ok(serde_json::to_string_pretty(shown)?)
}

/// Renders the markdown ranking report for the top `top` products.
#[must_use]
pub fn ranked_markdown(
    ranked: &[ScoredProduct],
    priority: Priority,
    budget: Option<f64>,
    top: usize,
) -> String {
    let mut lines = vec![
        "## Ranked Products".to_string(),
        format!("**Priority:** {priority}"),
    ];
    if let Some(budget) = budget.filter(|b| *b > 0.0) {
        lines.push(format!("**Budget:** ${budget:.2}"));
    }
    lines.push(format!("**Items analyzed:** {}", ranked.len()));
    lines.push(String::new());

    for (position, product) in ranked.iter().take(top).enumerate() {
        let record = &product.record;
        let name = if record.name.is_empty() {
            "Unknown Product"
        } else {
            record.name.as_str()
        };

        lines.push(format!("### {}. {name}", position + 1));
        lines.push(format!("**Price:** {}", display_price(record.price.as_ref())));
        lines.push(format!(
            "**Rating:** {}/5 ({} reviews)",
            display_rating(record.rating),
            display_reviews(record.review_count.as_ref())
        ));
        lines.push(format!("**Score:** {:.1}/100", product.score));
        if !record.url.is_empty() {
            lines.push(format!("**Link:** {}", record.url));
        }
        if !record.specs.is_empty() {
            let specs: Vec<String> = record
                .specs
                .iter()
                .take(SUMMARY_ITEMS)
                .map(|(k, v)| match v {
                    serde_json::Value::String(s) => format!("{k}: {s}"),
                    other => format!("{k}: {other}"),
                })
                .collect();
            lines.push(format!("**Specs:** {}", specs.join(", ")));
        }
        if !record.features.is_empty() {
            let features: Vec<&str> = record
                .features
                .iter()
                .take(SUMMARY_ITEMS)
                .map(String::as_str)
                .collect();
            lines.push(format!("**Features:** {}", features.join(", ")));
        }
        lines.push(String::new());
        lines.push("---".to_string());
        lines.push(String::new());
    }

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn display_price(price: Option<&NumberOrText>) -> String {
    match price {
        None => "N/A".to_string(),
        Some(NumberOrText::Number(n)) => format!("${n:.2}"),
        Some(NumberOrText::Text(s)) if s.starts_with(|c: char| !c.is_ascii_digit()) => s.clone(),
        Some(NumberOrText::Text(s)) => format!("${s}"),
    }
}

fn display_rating(rating: f64) -> String {
    if rating.fract() == 0.0 {
        format!("{rating:.1}")
    } else {
        rating.to_string()
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn display_reviews(reviews: Option<&NumberOrText>) -> String {
    match reviews {
        None => "N/A".to_string(),
        Some(NumberOrText::Number(n)) if n.fract() == 0.0 && *n >= 0.0 => group_thousands(*n as u64),
        Some(other) => other.to_string(),
    }
}

/// Formats an integer with comma thousands separators.
#[must_use]
pub fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
