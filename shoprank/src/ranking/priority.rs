//! Priority modes and their score adjustments.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::errors::ShoprankError;

/// Inputs a priority adjustment may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreInputs {
    /// Star rating.
    pub rating: f64,
    /// Normalized review count.
    pub reviews: u64,
    /// Normalized price; zero when unknown.
    pub price: f64,
    /// Budget ceiling, if one was given.
    pub budget: Option<f64>,
}

/// The dimension the user cares most about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Favour highly rated items.
    #[default]
    Rating,
    /// Favour heavily reviewed items.
    Reviews,
    /// Favour cheap items, relative to the budget when one is set.
    Price,
    /// Feature matching. Currently applies no adjustment.
    Features,
}

impl Priority {
    /// All modes, in CLI order.
    pub const ALL: [Self; 4] = [Self::Rating, Self::Price, Self::Reviews, Self::Features];

    /// Lowercase name of the mode.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Reviews => "reviews",
            Self::Price => "price",
            Self::Features => "features",
        }
    }

    /// Applies this mode's adjustment to a base score.
    #[must_use]
    pub fn adjust(self, score: f64, inputs: &ScoreInputs) -> f64 {
        match self {
            Self::Rating => score * 1.2 + inputs.rating * 10.0,
            Self::Reviews => score * 1.3 + log_bonus(inputs.reviews, 10.0),
            Self::Price => score + price_bonus(inputs.price, inputs.budget),
            Self::Features => score,
        }
    }
}

/// `min(30, log10(max(1, reviews)) * per_decade)`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn log_bonus(reviews: u64, per_decade: f64) -> f64 {
    ((reviews.max(1) as f64).log10() * per_decade).min(30.0)
}

// Up to 20 points, shrinking linearly as the price approaches the budget
// (or $100 without one). Unknown prices earn nothing.
fn price_bonus(price: f64, budget: Option<f64>) -> f64 {
    if price <= 0.0 {
        return 0.0;
    }
    let relative = match budget.filter(|b| *b > 0.0) {
        Some(budget) => price / budget * 20.0,
        None => price / 100.0,
    };
    (20.0 - relative).max(0.0)
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = ShoprankError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(Self::Rating),
            "reviews" => Ok(Self::Reviews),
            "price" => Ok(Self::Price),
            "features" => Ok(Self::Features),
            _ => Err(ShoprankError::InvalidPriority(s.to_string())),
        }
    }
}
