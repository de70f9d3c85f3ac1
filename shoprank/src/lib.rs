//! # Shoprank
//!
//! Product extraction from accessibility snapshots, and multi-criteria
//! ranking of product records.
//!
//! Shoprank provides:
//!
//! - **Container-scoped extraction**: pair each product heading with the
//!   catalog identifier inside the same container, never across containers
//! - **Pluggable heading classification**: keyword, generic, or custom
//!   classifiers chained behind one trait
//! - **Composite scoring**: rating, review volume and price blended per
//!   priority mode, with budget disqualification
//! - **Two-phase ranking**: score order first, then rating and review
//!   tie-breaks among near-equal scores
//!
//! ## Quick Start
//!
//! ```rust
//! use shoprank::prelude::*;
//!
//! let snapshot = r#"
//!   - listitem [ref=e10]:
//!     - heading "Contour Next Blood Glucose Monitor Kit" [ref=e12]
//!     - link "Contour Next" [ref=e13]:
//!       - /url: /Contour-Next/dp/B01ABCUVWX/ref=sr_1_1
//! "#;
//! let extractor = SnapshotExtractor::new(&ExtractionConfig::default())?;
//! let candidates = extractor.extract_str(snapshot);
//! assert_eq!(candidates[0].identifier, "B01ABCUVWX");
//!
//! let ranked = rank(
//!     vec![ProductRecord::new("Meter").with_price(19.99).with_rating(4.5)],
//!     Priority::Rating,
//!     Some(20.0),
//! )?;
//! assert_eq!(ranked.len(), 1);
//! # Ok::<(), ShoprankError>(())
//! ```

#![forbid(unsafe_code)]
#![warn(
    clippy::all,
    clippy::pedantic,
    missing_docs,
    rust_2018_idioms
)]
#![allow(
    clippy::module_name_repetitions,
    clippy::must_use_candidate,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

pub mod config;
pub mod errors;
pub mod loader;
pub mod normalize;
pub mod ranking;
pub mod report;
pub mod snapshot;


/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::{ExtractionConfig, RankingConfig, ShoprankConfig};
    pub use crate::errors::{ErrorPayload, ShoprankError};
    pub use crate::loader::{load_products, parse_products, LoadedProducts, SkippedLine};
    pub use crate::normalize::NumberOrText;
    pub use crate::ranking::{
        rank, Priority, ProductRecord, Ranker, RankingStats, ScoreOutcome, ScoredProduct, Scorer,
    };
    pub use crate::snapshot::{
        extract_products, HeadingChain, HeadingClassifier, ProductCandidate, SnapshotExtractor,
    };
}
