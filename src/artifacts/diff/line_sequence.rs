use crate::artifacts::core::options::CompareOptions;
use std::path::Path;

/// The lines of one file, each keeping its terminator. `\r\n` and a lone
/// `\r` are read as `\n`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSequence(Vec<String>);

impl LineSequence {
    /// Splits raw file content into lines. Invalid UTF-8 is replaced with
    /// U+FFFD rather than rejected.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let content = String::from_utf8_lossy(bytes);
        if !content.contains('\r') {
            return content.split_inclusive('\n').map(str::to_owned).collect();
        }

        content
            .replace("\r\n", "\n")
            .replace('\r', "\n")
            .split_inclusive('\n')
            .map(str::to_owned)
            .collect()
    }

    pub fn read(path: &Path) -> std::io::Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Self::from_bytes(&bytes))
    }

    pub fn lines(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// What each line is matched by under the given options.
    pub fn keys(&self, options: &CompareOptions) -> Vec<&str> {
        self.0
            .iter()
            .map(|line| options.comparison_key(line))
            .collect()
    }
}

impl FromIterator<String> for LineSequence {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        LineSequence(iter.into_iter().collect())
    }
}

impl From<&str> for LineSequence {
    fn from(content: &str) -> Self {
        Self::from_bytes(content.as_bytes())
    }
}
