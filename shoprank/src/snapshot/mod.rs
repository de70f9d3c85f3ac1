//! Product extraction from accessibility snapshots.
//!
//! A snapshot is an indented text rendering of a page's element tree:
//!
//! ```text
//!   - listitem [ref=e10]:
//!     - heading "Contour Next Blood Glucose Monitor Kit" [ref=e12]
//!     - link "Contour Next Blood Glucose Monitor Kit" [ref=e13]:
//!       - /url: /Contour-Next/dp/B01ABCUVWX/ref=sr_1_1
//! ```
//!
//! This module provides:
//! - Line-level parsing (depth, element refs, identifiers)
//! - Pluggable heading classification
//! - The container-scoped extractor

mod extractor;
mod heading;
mod line;

pub use extractor::{extract_products, ProductCandidate, SnapshotExtractor};
pub use heading::{
    GenericHeadingClassifier, HeadingChain, HeadingClassifier, KeywordHeadingClassifier,
};
pub use line::{indent_depth, SnapshotLine};
