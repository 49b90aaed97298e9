use crate::{Error, Result};
use std::path::Path;

/// A captured console log, held in memory as one text.
///
/// Line order is significant: it defines block boundaries and which
/// occurrence of a telemetry message is the latest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogDocument {
    text: String,
}

impl LogDocument {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Read a finished log file. Bytes that are not valid UTF-8 are
    /// replaced instead of failing the load.
    pub fn load_from(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| Error::Log {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_text(String::from_utf8_lossy(&bytes).into_owned()))
    }

    /// Trimmed view of each line, used for marker detection.
    pub fn trimmed_lines(&self) -> impl Iterator<Item = &str> {
        self.text.lines().map(str::trim)
    }

    /// The whole log as a single blob with line breaks preserved.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn line_count(&self) -> usize {
        self.text.lines().count()
    }
}

/// The lines of one occurrence of a telemetry message, marker line first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TmBlock<'a> {
    pub id: String,
    pub lines: Vec<&'a str>,
}

impl<'a> TmBlock<'a> {
    pub fn new(id: impl Into<String>, lines: Vec<&'a str>) -> Self {
        Self {
            id: id.into(),
            lines,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }
}
