use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Unchanged lines shown around each change in unified output.
pub const DEFAULT_CONTEXT_LINES: usize = 3;
/// Minimum character similarity for two changed lines to be shown with
/// intraline emphasis instead of as whole-line changes.
pub const INTRALINE_CUTOFF: f64 = 0.75;
/// Side-by-side cells are soft-wrapped after this many characters.
pub const WRAP_COLUMN: usize = 80;
pub const TAB_SIZE: usize = 8;
/// Files larger than this are compared by size only.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum DiffMode {
    #[default]
    Unified,
    Html,
}

impl DiffMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            DiffMode::Unified => "unified",
            DiffMode::Html => "html",
        }
    }
}

impl Display for DiffMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DiffMode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unified" => Ok(DiffMode::Unified),
            "html" => Ok(DiffMode::Html),
            _ => anyhow::bail!("unknown diff mode '{}', expected 'unified' or 'html'", s),
        }
    }
}

/// Tunables shared by every comparison of a request.
///
/// Built from [`Default`] and adjusted field by field. Exclude globs are only
/// set through [`CompareOptions::with_exclude_patterns`].
#[derive(Debug, Clone)]
pub struct CompareOptions {
    pub context: usize,
    pub intraline_cutoff: f64,
    pub wrap_column: usize,
    pub tab_size: usize,
    pub ignore_trim_whitespace: bool,
    pub ignore_contents: bool,
    pub max_file_size: u64,
    exclude: GlobSet,
}

impl Default for CompareOptions {
    fn default() -> Self {
        CompareOptions {
            context: DEFAULT_CONTEXT_LINES,
            intraline_cutoff: INTRALINE_CUTOFF,
            wrap_column: WRAP_COLUMN,
            tab_size: TAB_SIZE,
            ignore_trim_whitespace: false,
            ignore_contents: false,
            max_file_size: MAX_FILE_SIZE,
            exclude: GlobSet::empty(),
        }
    }
}

impl CompareOptions {
    /// Compiles exclude globs matched against root-relative paths.
    ///
    /// `*` and `?` stop at `/`, `**` crosses directories, and names starting
    /// with a dot are matched like any other.
    pub fn with_exclude_patterns<S: AsRef<str>>(mut self, patterns: &[S]) -> anyhow::Result<Self> {
        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            let glob = GlobBuilder::new(pattern.as_ref())
                .literal_separator(true)
                .build()
                .map_err(|e| {
                    anyhow::anyhow!("invalid exclude pattern '{}': {}", pattern.as_ref(), e)
                })?;
            builder.add(glob);
        }
        self.exclude = builder.build()?;

        Ok(self)
    }

    /// Whether a root-relative, forward-slash path is filtered out of a walk.
    pub fn is_excluded(&self, relative_path: &str) -> bool {
        self.exclude.is_match(relative_path)
    }

    /// Whether a file of this many bytes has its lines compared. Otherwise
    /// only its size takes part.
    pub fn reads_contents(&self, size: u64) -> bool {
        !self.ignore_contents && size <= self.max_file_size
    }

    /// The text a line is compared by. Rendering always uses the line as read.
    pub fn comparison_key<'l>(&self, line: &'l str) -> &'l str {
        if self.ignore_trim_whitespace {
            line.trim()
        } else {
            line
        }
    }
}
