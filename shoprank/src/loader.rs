//! Loading product records from line-delimited JSON.

use std::io::BufRead;
use std::path::Path;
use tracing::{debug, info};

use crate::errors::ShoprankError;
use crate::ranking::ProductRecord;

/// Records read from a JSONL source, plus the lines that were skipped.
#[derive(Debug, Clone, Default)]
pub struct LoadedProducts {
    /// Successfully parsed records, in file order.
    pub records: Vec<ProductRecord>,
    /// Parse failures for individual lines.
    pub skipped: Vec<SkippedLine>,
}

/// A line that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// One-based line number.
    pub line: usize,
    /// Parser message.
    pub message: String,
}

impl From<&SkippedLine> for ShoprankError {
    fn from(skipped: &SkippedLine) -> Self {
        Self::parse(skipped.line, skipped.message.clone())
    }
}

/// Parses one record per non-blank line. Malformed lines, including lines
/// that are not valid UTF-8, are skipped.
pub fn parse_products<R: BufRead>(mut reader: R) -> Result<LoadedProducts, ShoprankError> {
    let mut loaded = LoadedProducts::default();
    let mut buf = Vec::new();
    let mut line_number = 0;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_number += 1;

        let trimmed = buf.trim_ascii();
        if trimmed.is_empty() {
            continue;
        }
        match serde_json::from_slice::<ProductRecord>(trimmed) {
            Ok(record) => loaded.records.push(record),
            Err(e) => {
                let skipped = SkippedLine {
                    line: line_number,
                    message: e.to_string(),
                };
                debug!(error = %ShoprankError::from(&skipped), "skipping malformed record");
                loaded.skipped.push(skipped);
            }
        }
    }

    Ok(loaded)
}

/// Reads a JSONL product file.
pub fn load_products(path: impl AsRef<Path>) -> Result<LoadedProducts, ShoprankError> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|e| ShoprankError::from_io("Products", path, e))?;
    let loaded = parse_products(std::io::BufReader::new(file))?;
    info!(
        path = %path.display(),
        records = loaded.records.len(),
        skipped = loaded.skipped.len(),
        "products loaded"
    );
    Ok(loaded)
}
