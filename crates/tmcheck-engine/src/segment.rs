// Block segmentation - isolates the latest occurrence of a TM message
// A block for X runs from one marker-for-X line up to, not including, the next
// marker-for-X line. Lines of other messages in between belong to X's block.

use tmcheck_types::{LogDocument, TmBlock};

/// Marker text that precedes the identifier on a marker line.
pub const DEFAULT_MARKER: &str = "Received TM Id:-";

/// Recognizes marker lines of the form `<marker> <identifier>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerPattern {
    marker: String,
}

impl Default for MarkerPattern {
    fn default() -> Self {
        Self::new(DEFAULT_MARKER)
    }
}

impl MarkerPattern {
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into().trim().to_string(),
        }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// True if `line` announces a new occurrence of `tm_id`.
    ///
    /// Plain containment: a marker for `1A` also opens a block for `1`.
    pub fn is_marker_for(&self, line: &str, tm_id: &str) -> bool {
        line.contains(&format!("{} {}", self.marker, tm_id))
    }
}

/// Return the last block for `tm_id`, or an empty block if the identifier
/// never appears. Block lines are trimmed.
pub fn latest_block<'a>(log: &'a LogDocument, tm_id: &str, marker: &MarkerPattern) -> TmBlock<'a> {
    let lines = log
        .trimmed_lines()
        .fold(None, |open: Option<Vec<&'a str>>, line| {
            if marker.is_marker_for(line, tm_id) {
                Some(vec![line])
            } else {
                open.map(|mut block| {
                    block.push(line);
                    block
                })
            }
        })
        .unwrap_or_default();

    TmBlock::new(tm_id, lines)
}
