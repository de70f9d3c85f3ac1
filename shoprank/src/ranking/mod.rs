//! Scoring and ranking of product records.
//!
//! Ranking is two-phase. Records are scored and sorted by score; the sorted
//! list is then cut into runs of near-equal scores, and each run is re-sorted
//! by rating and review count so a composite score cannot hide a clearly
//! better-reviewed item.

mod priority;
mod ranker;
mod record;
mod scorer;

pub use priority::{log_bonus, Priority, ScoreInputs};
pub use ranker::{rank, Ranker, RankingStats};
pub use record::{ProductRecord, ScoredProduct};
pub use scorer::{check_budget, score, ScoreOutcome, Scorer};
