//! Heading recognition for product titles.
//!
//! Which snapshot lines count as product headings is a pluggable decision:
//! the extractor only talks to [`HeadingClassifier`]. The default chain tries
//! a keyword allowlist first and falls back to any heading whose label has a
//! plausible title length.

use regex::Regex;

use crate::config::ExtractionConfig;
use crate::errors::ShoprankError;

/// Decides whether a line is a product heading and extracts its title.
#[cfg_attr(test, mockall::automock)]
pub trait HeadingClassifier: Send + Sync {
    /// Returns the trimmed product name when `line` is a product heading.
    fn classify(&self, line: &str) -> Option<String>;

    /// Whether `line` is a product heading.
    fn is_product_heading(&self, line: &str) -> bool {
        self.classify(line).is_some()
    }
}

fn first_label(pattern: &Regex, line: &str) -> Option<String> {
    let label = pattern.captures(line)?.get(1)?.as_str().trim();
    (!label.is_empty()).then(|| label.to_string())
}

/// Matches headings whose label contains one of a fixed set of category keywords.
#[derive(Debug, Clone)]
pub struct KeywordHeadingClassifier {
    pattern: Option<Regex>,
}

impl KeywordHeadingClassifier {
    /// Builds the classifier. Whitespace inside a keyword matches any run of
    /// whitespace; matching is case-sensitive.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self, ShoprankError> {
        let alternatives: Vec<String> = keywords
            .iter()
            .map(|k| {
                k.as_ref()
                    .split_whitespace()
                    .map(regex::escape)
                    .collect::<Vec<_>>()
                    .join(r"\s+")
            })
            .filter(|k| !k.is_empty())
            .collect();

        if alternatives.is_empty() {
            return Ok(Self { pattern: None });
        }

        let source = format!(
            r#"heading\s+"([^"]+?(?:{})[^"]*)""#,
            alternatives.join("|")
        );
        let pattern = Regex::new(&source)
            .map_err(|e| ShoprankError::InvalidConfig(format!("keyword pattern: {e}")))?;
        Ok(Self {
            pattern: Some(pattern),
        })
    }
}

impl HeadingClassifier for KeywordHeadingClassifier {
    fn classify(&self, line: &str) -> Option<String> {
        first_label(self.pattern.as_ref()?, line)
    }
}

/// Matches any heading whose quoted label length lies within bounds.
#[derive(Debug, Clone)]
pub struct GenericHeadingClassifier {
    pattern: Regex,
}

impl GenericHeadingClassifier {
    /// Builds the classifier for labels of `min..=max` characters.
    pub fn new(min: usize, max: usize) -> Result<Self, ShoprankError> {
        let pattern = Regex::new(&format!(r#"heading\s+"([^"]{{{min},{max}}})""#))
            .map_err(|e| ShoprankError::InvalidConfig(format!("label pattern: {e}")))?;
        Ok(Self { pattern })
    }
}

impl HeadingClassifier for GenericHeadingClassifier {
    fn classify(&self, line: &str) -> Option<String> {
        first_label(&self.pattern, line)
    }
}

/// Tries classifiers in order and returns the first match.
#[derive(Default)]
pub struct HeadingChain {
    classifiers: Vec<Box<dyn HeadingClassifier>>,
}

impl HeadingChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a classifier.
    #[must_use]
    pub fn with(mut self, classifier: impl HeadingClassifier + 'static) -> Self {
        self.classifiers.push(Box::new(classifier));
        self
    }

    /// Keyword allowlist first, generic length fallback second.
    pub fn from_config(config: &ExtractionConfig) -> Result<Self, ShoprankError> {
        Ok(Self::new()
            .with(KeywordHeadingClassifier::new(config.keywords.as_slice())?)
            .with(GenericHeadingClassifier::new(
                config.min_label_len,
                config.max_label_len,
            )?))
    }

    /// Number of classifiers in the chain.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classifiers.len()
    }

    /// Whether the chain has no classifiers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classifiers.is_empty()
    }
}

impl std::fmt::Debug for HeadingChain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadingChain")
            .field("classifiers", &self.classifiers.len())
            .finish()
    }
}

impl HeadingClassifier for HeadingChain {
    fn classify(&self, line: &str) -> Option<String> {
        self.classifiers.iter().find_map(|c| c.classify(line))
    }
}
