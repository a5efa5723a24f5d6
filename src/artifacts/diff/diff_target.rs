use crate::artifacts::diff::line_sequence::LineSequence;
use derive_new::new;
use std::path::Path;

pub const NULL_PATH: &str = "/dev/null";

/// One side of a comparison: the lines plus the label shown for them in
/// headers.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct DiffTarget {
    label: String,
    lines: LineSequence,
}

impl DiffTarget {
    pub fn from_file(path: &Path, label: impl Into<String>) -> std::io::Result<Self> {
        Ok(Self {
            label: label.into(),
            lines: LineSequence::read(path)?,
        })
    }

    /// The missing side of a file that exists on one side only.
    pub fn from_nothing() -> Self {
        Self {
            label: NULL_PATH.to_string(),
            lines: LineSequence::default(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn lines(&self) -> &LineSequence {
        &self.lines
    }
}
