//! Single lines of an accessibility snapshot.

use regex::Regex;
use std::sync::LazyLock;

static REF_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[ref=([^\]\s]+)\]").expect("ref pattern is valid"));

// A `/dp/<code>` path segment; the code must end the segment.
static IDENTIFIER_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/dp/([A-Z0-9]{10})(?:[^A-Za-z0-9]|$)").expect("identifier pattern is valid")
});

/// One line of a snapshot together with its tree depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotLine<'a> {
    /// Zero-based position in the input.
    pub index: usize,
    /// Number of leading space characters.
    pub depth: usize,
    /// The raw line text, indentation included.
    pub text: &'a str,
}

impl<'a> SnapshotLine<'a> {
    /// Wraps a raw line, computing its depth.
    #[must_use]
    pub fn new(index: usize, text: &'a str) -> Self {
        Self {
            index,
            depth: indent_depth(text),
            text,
        }
    }

    /// Whether the line has no content.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }

    /// The `[ref=...]` token on this line, if any.
    #[must_use]
    pub fn element_ref(&self) -> Option<&'a str> {
        REF_PATTERN
            .captures(self.text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// The product identifier embedded in a `/dp/` URL segment, if any.
    #[must_use]
    pub fn identifier(&self) -> Option<&'a str> {
        IDENTIFIER_PATTERN
            .captures(self.text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }
}

/// Counts leading spaces. Tabs are not indentation.
#[must_use]
pub fn indent_depth(line: &str) -> usize {
    line.len() - line.trim_start_matches(' ').len()
}
