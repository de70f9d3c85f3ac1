//! Configuration types for extraction and ranking.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::ShoprankError;

/// Configuration for snapshot extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Number of lines, counted from the heading line itself, in which the
    /// identifier must appear.
    #[serde(default = "default_lookahead_window")]
    pub lookahead_window: usize,
    /// Minimum label length accepted by the generic heading fallback.
    #[serde(default = "default_min_label_len")]
    pub min_label_len: usize,
    /// Maximum label length accepted by the generic heading fallback.
    #[serde(default = "default_max_label_len")]
    pub max_label_len: usize,
    /// Product-category keywords that mark a heading as a product title.
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,
}

fn default_lookahead_window() -> usize {
    20
}

fn default_min_label_len() -> usize {
    20
}

fn default_max_label_len() -> usize {
    100
}

fn default_keywords() -> Vec<String> {
    [
        "Blood Glucose",
        "Glucometer",
        "Monitor",
        "Contour",
        "OneTouch",
        "Accu-Chek",
        "Metene",
        "TRUE METRIX",
        "Care Sens",
        "Prodigy",
        "Ariba",
        "Ketone",
        "Lancet",
        "Test Strip",
        "Diabetes",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            lookahead_window: default_lookahead_window(),
            min_label_len: default_min_label_len(),
            max_label_len: default_max_label_len(),
            keywords: default_keywords(),
        }
    }
}

impl ExtractionConfig {
    /// Creates a new extraction configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the lookahead window.
    #[must_use]
    pub fn with_lookahead_window(mut self, lines: usize) -> Self {
        self.lookahead_window = lines;
        self
    }

    /// Replaces the keyword allowlist.
    #[must_use]
    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    /// Adds a keyword to the allowlist.
    #[must_use]
    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keywords.push(keyword.into());
        self
    }

    /// Sets the generic label length bounds.
    #[must_use]
    pub fn with_label_bounds(mut self, min: usize, max: usize) -> Self {
        self.min_label_len = min;
        self.max_label_len = max;
        self
    }

    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), ShoprankError> {
        check_lookahead_window(self.lookahead_window)?;
        if self.min_label_len > self.max_label_len {
            return Err(ShoprankError::InvalidConfig(format!(
                "min_label_len ({}) exceeds max_label_len ({})",
                self.min_label_len, self.max_label_len
            )));
        }
        Ok(())
    }
}

/// A window must reach at least the line after the heading.
pub fn check_lookahead_window(lines: usize) -> Result<usize, ShoprankError> {
    if lines < 2 {
        return Err(ShoprankError::InvalidConfig(format!(
            "lookahead_window must be at least 2, got {lines}"
        )));
    }
    Ok(lines)
}

/// Configuration for scoring and ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingConfig {
    /// Items closer than this to a run's anchor score are tie-broken by
    /// rating and review count.
    #[serde(default = "default_tie_threshold")]
    pub tie_threshold: f64,
    /// Bonus for prime-eligible items.
    #[serde(default = "default_prime_bonus")]
    pub prime_bonus: f64,
    /// Penalty for sponsored placements.
    #[serde(default = "default_sponsored_penalty")]
    pub sponsored_penalty: f64,
}

fn default_tie_threshold() -> f64 {
    5.0
}

fn default_prime_bonus() -> f64 {
    5.0
}

fn default_sponsored_penalty() -> f64 {
    3.0
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            tie_threshold: default_tie_threshold(),
            prime_bonus: default_prime_bonus(),
            sponsored_penalty: default_sponsored_penalty(),
        }
    }
}

impl RankingConfig {
    /// Creates a new ranking configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the tie-break threshold.
    #[must_use]
    pub fn with_tie_threshold(mut self, threshold: f64) -> Self {
        self.tie_threshold = threshold;
        self
    }

    /// Checks the configuration for values that cannot work.
    pub fn validate(&self) -> Result<(), ShoprankError> {
        if !self.tie_threshold.is_finite() || self.tie_threshold < 0.0 {
            return Err(ShoprankError::InvalidConfig(format!(
                "tie_threshold must be a non-negative number, got {}",
                self.tie_threshold
            )));
        }
        if !self.prime_bonus.is_finite() || !self.sponsored_penalty.is_finite() {
            return Err(ShoprankError::InvalidConfig(
                "prime_bonus and sponsored_penalty must be finite".to_string(),
            ));
        }
        Ok(())
    }
}

/// Combined configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShoprankConfig {
    /// Extraction configuration.
    #[serde(default)]
    pub extraction: ExtractionConfig,
    /// Ranking configuration.
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl ShoprankConfig {
    /// Creates a new configuration with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses and validates a configuration from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ShoprankError> {
        let config: Self = serde_json::from_str(text)
            .map_err(|e| ShoprankError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a configuration file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ShoprankError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ShoprankError::from_io("Config", path, e))?;
        Self::from_json(&text)
    }

    /// Validates both sections.
    pub fn validate(&self) -> Result<(), ShoprankError> {
        self.extraction.validate()?;
        self.ranking.validate()
    }
}
