//! Two-phase ranking: global score order, then local tie-breaks.

use std::cmp::Ordering;
use tracing::{debug, info};

use super::priority::Priority;
use super::record::{ProductRecord, ScoredProduct};
use super::scorer::{ScoreOutcome, Scorer};
use crate::config::RankingConfig;
use crate::errors::ShoprankError;

/// Counts from one ranking pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RankingStats {
    /// Records offered to the ranker.
    pub considered: usize,
    /// Records dropped for exceeding the budget.
    pub disqualified: usize,
    /// Records dropped because their price could not be read.
    pub unparseable: usize,
    /// Tie-break runs with more than one item.
    pub tie_groups: usize,
}

/// Ranks product records for a priority mode and optional budget.
#[derive(Debug, Clone)]
pub struct Ranker {
    scorer: Scorer,
    tie_threshold: f64,
}

impl Ranker {
    /// Creates a ranker with the default configuration.
    pub fn new(priority: Priority, budget: Option<f64>) -> Result<Self, ShoprankError> {
        Self::with_config(priority, budget, RankingConfig::default())
    }

    /// Creates a ranker with a custom configuration. The configuration and
    /// the budget are validated.
    pub fn with_config(
        priority: Priority,
        budget: Option<f64>,
        config: RankingConfig,
    ) -> Result<Self, ShoprankError> {
        let tie_threshold = config.tie_threshold;
        Ok(Self {
            scorer: Scorer::with_config(priority, budget, config)?,
            tie_threshold,
        })
    }

    /// Ranks records, dropping any that cannot be ranked.
    pub fn rank(&self, records: Vec<ProductRecord>) -> Vec<ScoredProduct> {
        self.rank_with_stats(records).0
    }

    /// Ranks records and reports what was dropped.
    pub fn rank_with_stats(&self, records: Vec<ProductRecord>) -> (Vec<ScoredProduct>, RankingStats) {
        let mut stats = RankingStats {
            considered: records.len(),
            ..RankingStats::default()
        };

        let mut ranked: Vec<ScoredProduct> = records
            .into_iter()
            .filter_map(|record| match self.scorer.score(&record) {
                ScoreOutcome::Scored(score) => Some(ScoredProduct::new(record, score)),
                ScoreOutcome::Disqualified => {
                    debug!(name = %record.name, "over budget");
                    stats.disqualified += 1;
                    None
                }
                ScoreOutcome::Unparseable => {
                    stats.unparseable += 1;
                    None
                }
            })
            .collect();

        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));

        // Each run holds the items within the threshold of its first item.
        let mut start = 0;
        while start < ranked.len() {
            let anchor = ranked[start].score;
            let end = ranked[start + 1..]
                .iter()
                .position(|p| (anchor - p.score).abs() >= self.tie_threshold)
                .map_or(ranked.len(), |offset| start + 1 + offset);
            if end - start > 1 {
                ranked[start..end].sort_by(compare_rating_then_reviews);
                stats.tie_groups += 1;
            }
            start = end;
        }

        info!(
            priority = %self.scorer.priority(),
            budget = ?self.scorer.budget(),
            considered = stats.considered,
            ranked = ranked.len(),
            disqualified = stats.disqualified,
            unparseable = stats.unparseable,
            "products ranked"
        );
        (ranked, stats)
    }
}

/// Higher rating first, then more reviews.
fn compare_rating_then_reviews(a: &ScoredProduct, b: &ScoredProduct) -> Ordering {
    b.record
        .rating
        .total_cmp(&a.record.rating)
        .then_with(|| b.record.reviews().cmp(&a.record.reviews()))
}

/// Ranks records with the default configuration.
pub fn rank(
    records: Vec<ProductRecord>,
    priority: Priority,
    budget: Option<f64>,
) -> Result<Vec<ScoredProduct>, ShoprankError> {
    Ok(Ranker::new(priority, budget)?.rank(records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn names(ranked: &[ScoredProduct]) -> Vec<&str> {
        ranked.iter().map(|p| p.record.name.as_str()).collect()
    }

    #[test]
    fn test_close_scores_prefer_higher_rating() {
        let records = vec![
            ProductRecord::new("many-reviews").with_rating(4.5).with_reviews(1000_u64),
            ProductRecord::new("higher-rated").with_rating(4.6).with_reviews(300_u64),
        ];

        let ranked = rank(records, Priority::Rating, None).unwrap();
        assert!((ranked[0].score - ranked[1].score).abs() < 5.0);
        assert_eq!(names(&ranked), ["higher-rated", "many-reviews"]);
    }

    #[test]
    fn test_budget_excludes_expensive_items() {
        let records = vec![
            ProductRecord::new("pricey").with_price(25.0).with_rating(5.0).with_reviews(50_000_u64),
            ProductRecord::new("cheap").with_price("$12.99").with_rating(3.0),
        ];

        let ranked = rank(records, Priority::Rating, Some(20.0)).unwrap();
        assert_eq!(names(&ranked), ["cheap"]);
    }

    #[test]
    fn test_no_item_exceeds_budget() {
        let records: Vec<ProductRecord> = (0..40_u32)
            .map(|i| {
                ProductRecord::new(format!("item-{i}"))
                    .with_price(f64::from(i) * 2.5)
                    .with_rating(f64::from(i % 6))
            })
            .collect();

        for budget in [0.0, 10.0, 33.3, 97.5, 200.0] {
            let ranked = rank(records.clone(), Priority::Price, Some(budget)).unwrap();
            assert!(ranked.iter().all(|p| p.record.price_amount().unwrap() <= budget));
        }
    }

    #[test]
    fn test_distant_scores_keep_score_order() {
        let records = vec![
            ProductRecord::new("low").with_rating(1.0),
            ProductRecord::new("high").with_rating(5.0),
            ProductRecord::new("mid").with_rating(3.0),
        ];
        let ranked = rank(records, Priority::Features, None).unwrap();
        assert_eq!(names(&ranked), ["high", "mid", "low"]);
    }

    #[test]
    fn test_runs_are_anchored_on_first_item() {
        // Features mode, no reviews: a=48, b=45, c=44, d=45-3=42.
        // b and c are within 5 of a; d is not, so it starts a new run even
        // though it is within 5 of c and out-rates it.
        let records = vec![
            ProductRecord::new("a").with_rating(4.8).with_reviews(1_u64),
            ProductRecord::new("b").with_rating(4.5),
            ProductRecord::new("c").with_rating(4.4),
            ProductRecord::new("d").with_rating(4.5).sponsored(),
        ];

        let (ranked, stats) = Ranker::new(Priority::Features, None).unwrap().rank_with_stats(records);
        assert_eq!(names(&ranked), ["a", "b", "c", "d"]);
        assert_eq!(stats.tie_groups, 1);
    }

    #[test]
    fn test_tie_break_overrides_score_order() {
        // Prime lifts "prime" above "plain", but within the
        // threshold rating decides.
        let records = vec![
            ProductRecord::new("prime").with_rating(4.0).with_reviews(10_u64).prime(),
            ProductRecord::new("plain").with_rating(4.2).with_reviews(10_u64),
        ];
        let ranked = rank(records, Priority::Features, None).unwrap();
        assert!(ranked[1].score > ranked[0].score);
        assert_eq!(names(&ranked), ["plain", "prime"]);
    }

    #[test]
    fn test_equal_rating_breaks_on_reviews() {
        let records = vec![
            ProductRecord::new("fewer").with_rating(4.0).with_reviews("90 ratings"),
            ProductRecord::new("more").with_rating(4.0).with_reviews("110 ratings"),
        ];
        let ranked = rank(records, Priority::Features, None).unwrap();
        assert_eq!(names(&ranked), ["more", "fewer"]);
    }

    #[test]
    fn test_threshold_is_exclusive() {
        // Unrated, unreviewed items score 0; prime adds exactly 5.
        let records = || vec![ProductRecord::new("plain"), ProductRecord::new("prime").prime()];

        let (_, stats) = Ranker::new(Priority::Features, None).unwrap().rank_with_stats(records());
        assert_eq!(stats.tie_groups, 0);

        let config = RankingConfig {
            prime_bonus: 4.99,
            ..RankingConfig::default()
        };
        let (_, stats) =
            Ranker::with_config(Priority::Features, None, config).unwrap().rank_with_stats(records());
        assert_eq!(stats.tie_groups, 1);
    }

    #[test]
    fn test_custom_tie_threshold() {
        let records = vec![
            ProductRecord::new("prime").with_rating(4.0).prime(),
            ProductRecord::new("plain").with_rating(4.2),
        ];
        let config = RankingConfig::new().with_tie_threshold(1.0);
        let ranked = Ranker::with_config(Priority::Features, None, config).unwrap().rank(records);
        assert_eq!(names(&ranked), ["prime", "plain"]);
    }

    #[test]
    fn test_stats_count_drops() {
        let records = vec![
            ProductRecord::new("ok").with_price(5.0),
            ProductRecord::new("over").with_price(500.0),
            ProductRecord::new("garbled").with_price("call for price"),
        ];
        let (ranked, stats) = Ranker::new(Priority::Rating, Some(100.0)).unwrap().rank_with_stats(records);
        assert_eq!(names(&ranked), ["ok"]);
        assert_eq!(
            stats,
            RankingStats {
                considered: 3,
                disqualified: 1,
                unparseable: 1,
                tie_groups: 0,
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let records: Vec<ProductRecord> = (0..25_u32)
            .map(|i| {
                ProductRecord::new(format!("item-{i}"))
                    .with_rating(f64::from(i % 5) + 0.5)
                    .with_reviews(u64::from(i * 37))
            })
            .collect();
        let first = rank(records.clone(), Priority::Reviews, None).unwrap();
        let second = rank(records, Priority::Reviews, None).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input() {
        assert!(rank(Vec::new(), Priority::Rating, Some(10.0)).unwrap().is_empty());
    }

    #[test]
    fn test_nan_budget_is_rejected() {
        let records = vec![ProductRecord::new("pricey").with_price(25.0)];
        assert!(matches!(
            rank(records, Priority::Rating, Some(f64::NAN)),
            Err(ShoprankError::InvalidBudget(_))
        ));
    }

    #[test]
    fn test_nan_tie_threshold_is_rejected() {
        let config = RankingConfig::new().with_tie_threshold(f64::NAN);
        assert!(matches!(
            Ranker::with_config(Priority::Rating, None, config),
            Err(ShoprankError::InvalidConfig(_))
        ));
    }
}
