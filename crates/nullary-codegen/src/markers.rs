//! Marker-delimited regions in hand-maintained files
//!
//! Aggregator files carry a pair of marker lines around the generated part.
//! Everything outside the pair belongs to humans and is preserved byte for byte.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarkerError {
    #[error("Missing marker line `{marker}`")]
    Missing { marker: String },

    #[error("Marker line `{marker}` appears {count} times")]
    Duplicated { marker: String, count: usize },

    #[error("Marker `{end}` precedes `{begin}`")]
    OutOfOrder { begin: String, end: String },
}

/// A text split around one marker pair.
///
/// `prefix` ends with the begin marker line (including its newline) and
/// `suffix` starts at the end marker line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedRegion<'a> {
    pub prefix: &'a str,
    pub region: &'a str,
    pub suffix: &'a str,
}

/// Byte ranges of every line equal to `marker`, ignoring trailing whitespace.
fn marker_lines(text: &str, marker: &str) -> Vec<(usize, usize)> {
    let mut found = Vec::new();
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end() == marker {
            found.push((offset, offset + line.len()));
        }
        offset += line.len();
    }
    found
}

fn single_marker_line(text: &str, marker: &str) -> Result<(usize, usize), MarkerError> {
    let found = marker_lines(text, marker);
    match found.as_slice() {
        [] => Err(MarkerError::Missing {
            marker: marker.to_string(),
        }),
        [line] => Ok(*line),
        _ => Err(MarkerError::Duplicated {
            marker: marker.to_string(),
            count: found.len(),
        }),
    }
}

impl<'a> MarkedRegion<'a> {
    /// Split `text` around the lines `begin` and `end`, each of which must appear exactly once.
    pub fn parse(text: &'a str, begin: &str, end: &str) -> Result<Self, MarkerError> {
        let (_, begin_end) = single_marker_line(text, begin)?;
        let (end_start, _) = single_marker_line(text, end)?;
        if end_start < begin_end {
            return Err(MarkerError::OutOfOrder {
                begin: begin.to_string(),
                end: end.to_string(),
            });
        }
        Ok(Self {
            prefix: &text[..begin_end],
            region: &text[begin_end..end_start],
            suffix: &text[end_start..],
        })
    }

    /// The full text with the region replaced by `body`.
    pub fn with_region(&self, body: &str) -> String {
        let mut out = String::with_capacity(self.prefix.len() + body.len() + self.suffix.len());
        out.push_str(self.prefix);
        out.push_str(body);
        out.push_str(self.suffix);
        out
    }
}
