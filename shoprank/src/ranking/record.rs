//! Product records and their scored form.

use serde::{Deserialize, Serialize};

use crate::normalize::{price_value, review_count_value, NumberOrText};

/// A product as collected from a listing or detail page.
///
/// Every field is optional on input. Fields this type does not know about are
/// kept in `extra` and written back out unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductRecord {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Price as a number or a currency string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<NumberOrText>,
    /// Star rating, 0.0 to 5.0.
    #[serde(default)]
    pub rating: f64,
    /// Review count as a number or a formatted string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<NumberOrText>,
    /// Prime eligible.
    #[serde(default)]
    pub is_prime: bool,
    /// Sponsored placement.
    #[serde(default)]
    pub is_sponsored: bool,
    /// Specification table, in page order.
    #[serde(default)]
    pub specs: serde_json::Map<String, serde_json::Value>,
    /// Feature bullets, in page order.
    #[serde(default)]
    pub features: Vec<String>,
    /// Product page URL.
    #[serde(default)]
    pub url: String,
    /// Unrecognised fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ProductRecord {
    /// Creates a record with just a name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Sets the price.
    #[must_use]
    pub fn with_price(mut self, price: impl Into<NumberOrText>) -> Self {
        self.price = Some(price.into());
        self
    }

    /// Sets the rating.
    #[must_use]
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Sets the review count.
    #[must_use]
    pub fn with_reviews(mut self, reviews: impl Into<NumberOrText>) -> Self {
        self.review_count = Some(reviews.into());
        self
    }

    /// Marks the record as prime eligible.
    #[must_use]
    pub fn prime(mut self) -> Self {
        self.is_prime = true;
        self
    }

    /// Marks the record as sponsored.
    #[must_use]
    pub fn sponsored(mut self) -> Self {
        self.is_sponsored = true;
        self
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = url.into();
        self
    }

    /// Numeric price; `None` when the price text cannot be read.
    #[must_use]
    pub fn price_amount(&self) -> Option<f64> {
        price_value(self.price.as_ref())
    }

    /// Numeric review count; unreadable counts are zero.
    #[must_use]
    pub fn reviews(&self) -> u64 {
        review_count_value(self.review_count.as_ref())
    }
}

/// A record together with its composite score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredProduct {
    /// The underlying record.
    #[serde(flatten)]
    pub record: ProductRecord,
    /// Composite score; higher is better.
    #[serde(rename = "_score")]
    pub score: f64,
}

impl ScoredProduct {
    /// Pairs a record with its score.
    #[must_use]
    pub fn new(record: ProductRecord, score: f64) -> Self {
        Self { record, score }
    }
}
