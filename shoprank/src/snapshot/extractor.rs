//! Container-scoped product extraction.
//!
//! The snapshot is read once, top to bottom. Every product heading opens a
//! scope keyed by its depth; a later non-blank line that is shallower than a
//! scope closes it, and so does running past the lookahead window. The first
//! identifier line seen while a scope is open resolves it. A scope that closes
//! unresolved produces nothing, so a name is never paired with an identifier
//! from a neighbouring container.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::{debug, info};

use super::heading::{HeadingChain, HeadingClassifier};
use super::line::SnapshotLine;
use crate::config::{check_lookahead_window, ExtractionConfig};
use crate::errors::ShoprankError;

/// A product name paired with the identifier found in its container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductCandidate {
    /// Product display name, taken from the heading label.
    pub name: String,
    /// Ten-character catalog identifier.
    #[serde(rename = "asin")]
    pub identifier: String,
    /// Element reference of the identifier line, or of the heading when the
    /// identifier line carries none.
    #[serde(rename = "ref")]
    pub element_ref: Option<String>,
    /// Zero-based index of the heading line.
    pub line_index: usize,
}

impl ProductCandidate {
    /// Renders the candidate as `identifier<TAB>name`.
    #[must_use]
    pub fn to_tsv(&self) -> String {
        format!("{}\t{}", self.identifier, self.name)
    }
}

#[derive(Debug)]
struct OpenScope {
    name: String,
    depth: usize,
    line_index: usize,
    element_ref: Option<String>,
}

/// Extracts product candidates from snapshot lines.
#[derive(Debug)]
pub struct SnapshotExtractor<C = HeadingChain> {
    classifier: C,
    lookahead_window: usize,
}

impl SnapshotExtractor<HeadingChain> {
    /// Creates an extractor with the default heading chain.
    pub fn new(config: &ExtractionConfig) -> Result<Self, ShoprankError> {
        config.validate()?;
        Self::with_classifier(HeadingChain::from_config(config)?, config.lookahead_window)
    }
}

impl<C: HeadingClassifier> SnapshotExtractor<C> {
    /// Creates an extractor with a custom heading classifier.
    pub fn with_classifier(classifier: C, lookahead_window: usize) -> Result<Self, ShoprankError> {
        Ok(Self {
            classifier,
            lookahead_window: check_lookahead_window(lookahead_window)?,
        })
    }

    /// Extracts candidates, in heading order.
    pub fn extract<S: AsRef<str>>(&self, lines: &[S]) -> Vec<ProductCandidate> {
        let mut scopes: Vec<OpenScope> = Vec::new();
        let mut candidates = Vec::new();

        for (index, raw) in lines.iter().enumerate() {
            let line = SnapshotLine::new(index, raw.as_ref());

            // Scopes are ordered by heading index, so expired ones sit at the bottom.
            let expired = scopes
                .iter()
                .take_while(|s| index - s.line_index >= self.lookahead_window)
                .count();
            for scope in scopes.drain(..expired) {
                debug!(heading = %scope.name, line = scope.line_index, "lookahead window exhausted");
            }

            if !line.is_blank() {
                while scopes.last().is_some_and(|s| line.depth < s.depth) {
                    if let Some(scope) = scopes.pop() {
                        debug!(heading = %scope.name, line = scope.line_index, closed_at = index, "container closed without identifier");
                    }
                }
            }

            if let Some(identifier) = line.identifier() {
                let link_ref = line.element_ref();
                candidates.extend(scopes.drain(..).map(|scope| ProductCandidate {
                    name: scope.name,
                    identifier: identifier.to_string(),
                    element_ref: link_ref.map(String::from).or(scope.element_ref),
                    line_index: scope.line_index,
                }));
            }

            if let Some(name) = self.classifier.classify(line.text) {
                scopes.push(OpenScope {
                    name,
                    depth: line.depth,
                    line_index: index,
                    element_ref: line.element_ref().map(String::from),
                });
            }
        }

        for scope in scopes {
            debug!(heading = %scope.name, line = scope.line_index, "input ended without identifier");
        }
        info!(lines = lines.len(), products = candidates.len(), "snapshot extracted");
        candidates
    }

    /// Extracts candidates from a whole snapshot text.
    pub fn extract_str(&self, text: &str) -> Vec<ProductCandidate> {
        let lines: Vec<&str> = text.lines().collect();
        self.extract(&lines)
    }

    /// Reads and extracts a snapshot file.
    pub fn extract_path(&self, path: impl AsRef<Path>) -> Result<Vec<ProductCandidate>, ShoprankError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| ShoprankError::from_io("Snapshot", path, e))?;
        Ok(self.extract_str(&text))
    }
}

/// Extracts candidates with the default configuration.
pub fn extract_products<S: AsRef<str>>(lines: &[S]) -> Result<Vec<ProductCandidate>, ShoprankError> {
    Ok(SnapshotExtractor::new(&ExtractionConfig::default())?.extract(lines))
}
