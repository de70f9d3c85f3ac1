//! Composite scoring of a single product.

use tracing::debug;

use super::priority::{log_bonus, Priority, ScoreInputs};
use super::record::ProductRecord;
use crate::config::RankingConfig;
use crate::errors::ShoprankError;

/// What scoring a record produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreOutcome {
    /// The record is rankable with this score.
    Scored(f64),
    /// The price exceeds the budget.
    Disqualified,
    /// The price was needed but could not be read.
    Unparseable,
}

impl ScoreOutcome {
    /// The score, if the record is rankable.
    #[must_use]
    pub fn score(self) -> Option<f64> {
        match self {
            Self::Scored(score) => Some(score),
            Self::Disqualified | Self::Unparseable => None,
        }
    }
}

/// Scores records for one priority mode and budget.
#[derive(Debug, Clone)]
pub struct Scorer {
    priority: Priority,
    budget: Option<f64>,
    config: RankingConfig,
}

/// Checks that a budget is a finite, non-negative amount.
pub fn check_budget(budget: f64) -> Result<f64, ShoprankError> {
    if budget.is_finite() && budget >= 0.0 {
        Ok(budget)
    } else {
        Err(ShoprankError::InvalidBudget(budget))
    }
}

impl Scorer {
    /// Creates a scorer with the default ranking configuration.
    pub fn new(priority: Priority, budget: Option<f64>) -> Result<Self, ShoprankError> {
        Self::with_config(priority, budget, RankingConfig::default())
    }

    /// Creates a scorer with a custom ranking configuration.
    pub fn with_config(
        priority: Priority,
        budget: Option<f64>,
        config: RankingConfig,
    ) -> Result<Self, ShoprankError> {
        config.validate()?;
        let budget = budget.map(check_budget).transpose()?;
        Ok(Self {
            priority,
            budget,
            config,
        })
    }

    /// The priority mode in use.
    #[must_use]
    pub fn priority(&self) -> Priority {
        self.priority
    }

    /// The budget ceiling in use.
    #[must_use]
    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    /// Scores one record.
    pub fn score(&self, record: &ProductRecord) -> ScoreOutcome {
        let needs_price = self.budget.is_some() || self.priority == Priority::Price;
        let price = if needs_price {
            let Some(price) = record.price_amount() else {
                debug!(name = %record.name, price = ?record.price, "unreadable price, skipping");
                return ScoreOutcome::Unparseable;
            };
            price
        } else {
            0.0
        };

        if let Some(budget) = self.budget {
            if price > budget {
                return ScoreOutcome::Disqualified;
            }
        }

        let inputs = ScoreInputs {
            rating: record.rating,
            reviews: record.reviews(),
            price,
            budget: self.budget,
        };

        let base = (inputs.rating / 5.0) * 50.0 + log_bonus(inputs.reviews, 7.5);
        let mut score = self.priority.adjust(base, &inputs);

        if record.is_prime {
            score += self.config.prime_bonus;
        }
        if record.is_sponsored {
            score -= self.config.sponsored_penalty;
        }

        ScoreOutcome::Scored(score)
    }
}

/// Scores a record with default settings.
pub fn score(
    record: &ProductRecord,
    priority: Priority,
    budget: Option<f64>,
) -> Result<ScoreOutcome, ShoprankError> {
    Ok(Scorer::new(priority, budget)?.score(record))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scored(outcome: ScoreOutcome) -> f64 {
        outcome.score().expect("record should be scored")
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_over_budget_is_disqualified() {
        let record = ProductRecord::new("Meter").with_price(25.0).with_rating(5.0).with_reviews(100_000_u64);
        assert_eq!(score(&record, Priority::Rating, Some(20.0)).unwrap(), ScoreOutcome::Disqualified);
    }

    #[test]
    fn test_price_at_budget_is_kept() {
        let record = ProductRecord::new("Meter").with_price("$20.00");
        assert!(score(&record, Priority::Rating, Some(20.0)).unwrap().score().is_some());
    }

    #[test]
    fn test_formatted_price_is_normalized_for_budget() {
        let record = ProductRecord::new("Meter").with_price("$1,250.00");
        assert_eq!(score(&record, Priority::Rating, Some(999.0)).unwrap(), ScoreOutcome::Disqualified);
    }

    #[test]
    fn test_unreadable_price_with_budget() {
        let record = ProductRecord::new("Meter").with_price("See options");
        assert_eq!(score(&record, Priority::Rating, Some(50.0)).unwrap(), ScoreOutcome::Unparseable);
        // Without a budget the price is never looked at.
        assert!(score(&record, Priority::Rating, None).unwrap().score().is_some());
        assert_eq!(score(&record, Priority::Price, None).unwrap(), ScoreOutcome::Unparseable);
    }

    #[test]
    fn test_base_score() {
        // 4.0 stars = 40, 100 reviews = 15.
        let record = ProductRecord::new("Meter").with_rating(4.0).with_reviews(100_u64);
        assert!(close(scored(score(&record, Priority::Features, None).unwrap()), 55.0));
    }

    #[test]
    fn test_rating_priority() {
        let record = ProductRecord::new("Meter").with_rating(4.0).with_reviews(100_u64);
        assert!(close(scored(score(&record, Priority::Rating, None).unwrap()), 55.0 * 1.2 + 40.0));
    }

    #[test]
    fn test_reviews_priority_with_text_count() {
        let record = ProductRecord::new("Meter").with_rating(4.0).with_reviews("100 ratings");
        assert!(close(scored(score(&record, Priority::Reviews, None).unwrap()), 55.0 * 1.3 + 20.0));
    }

    #[test]
    fn test_price_priority() {
        let record = ProductRecord::new("Meter").with_rating(4.0).with_reviews(100_u64).with_price(10.0);
        assert!(close(scored(score(&record, Priority::Price, Some(40.0)).unwrap()), 55.0 + 15.0));
        assert!(close(scored(score(&record, Priority::Price, None).unwrap()), 55.0 + 19.9));
    }

    #[test]
    fn test_prime_and_sponsored_modifiers() {
        let plain = ProductRecord::new("Meter").with_rating(3.0);
        let base = scored(score(&plain, Priority::Features, None).unwrap());

        let prime = plain.clone().prime();
        assert!(close(scored(score(&prime, Priority::Features, None).unwrap()), base + 5.0));

        let sponsored = plain.clone().sponsored();
        assert!(close(scored(score(&sponsored, Priority::Features, None).unwrap()), base - 3.0));

        let both = plain.prime().sponsored();
        assert!(close(scored(score(&both, Priority::Features, None).unwrap()), base + 2.0));
    }

    #[test]
    fn test_modifiers_apply_after_priority() {
        let record = ProductRecord::new("Meter").with_rating(5.0).prime();
        // (50 * 1.2 + 50) + 5, not (50 + 5) * 1.2 + 50.
        assert!(close(scored(score(&record, Priority::Rating, None).unwrap()), 115.0));
    }

    #[test]
    fn test_negative_scores_are_still_scored() {
        let record = ProductRecord::new("Meter").sponsored();
        assert!(close(scored(score(&record, Priority::Features, None).unwrap()), -3.0));
    }

    #[test]
    fn test_custom_modifiers() {
        let config = RankingConfig {
            prime_bonus: 1.0,
            sponsored_penalty: 10.0,
            ..RankingConfig::default()
        };
        let scorer = Scorer::with_config(Priority::Features, None, config).unwrap();
        let record = ProductRecord::new("Meter").prime().sponsored();
        assert!(close(scored(scorer.score(&record)), -9.0));
        assert_eq!(scorer.priority(), Priority::Features);
        assert_eq!(scorer.budget(), None);
    }

    #[test]
    fn test_rejects_unusable_budgets() {
        for budget in [f64::NAN, f64::INFINITY, -1.0] {
            assert!(matches!(
                Scorer::new(Priority::Rating, Some(budget)),
                Err(ShoprankError::InvalidBudget(_))
            ));
        }
        assert!(Scorer::new(Priority::Rating, Some(0.0)).is_ok());
        assert_eq!(check_budget(20.0).unwrap(), 20.0);
    }

    #[test]
    fn test_rejects_unusable_config() {
        let config = RankingConfig {
            prime_bonus: f64::NAN,
            ..RankingConfig::default()
        };
        assert!(matches!(
            Scorer::with_config(Priority::Rating, None, config),
            Err(ShoprankError::InvalidConfig(_))
        ));
    }
}
