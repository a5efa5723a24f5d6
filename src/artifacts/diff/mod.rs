//! Line diffing and diff rendering
//!
//! - `matcher`: longest-matching-block sequence alignment into opcodes
//! - `hunk`: grouping of opcodes into unified-diff hunks
//! - `line_sequence`: file content as lossily decoded lines
//! - `diff_target`: one labelled side of a comparison
//! - `unified`: unified text rendering
//! - `side_by_side`: two-column table model with intraline emphasis
//! - `html`: embeddable markup for the side-by-side table

pub mod diff_target;
pub mod html;
pub mod hunk;
pub mod line_sequence;
pub mod matcher;
pub mod side_by_side;
pub mod unified;

use crate::artifacts::core::options::{CompareOptions, DiffMode};
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::side_by_side::SideBySideTable;
use std::path::Path;
use tracing::debug;

/// Renders a comparison in the requested output mode.
pub fn render(mode: DiffMode, from: &DiffTarget, to: &DiffTarget, options: &CompareOptions) -> String {
    match mode {
        DiffMode::Unified => unified::unified_diff(from, to, options),
        DiffMode::Html => SideBySideTable::build(from, to, options).to_html(),
    }
}

/// Compares two files on disk.
///
/// Lines are only compared when both files are within the size cap and
/// contents are not ignored. Otherwise the sizes decide: equal sizes render
/// as no difference, different sizes as a one-line summary.
pub fn compare_files(
    from: &Path,
    from_label: String,
    to: &Path,
    to_label: String,
    mode: DiffMode,
    options: &CompareOptions,
) -> std::io::Result<String> {
    let from_size = std::fs::metadata(from)?.len();
    let to_size = std::fs::metadata(to)?.len();

    if options.reads_contents(from_size) && options.reads_contents(to_size) {
        let from = DiffTarget::from_file(from, from_label)?;
        let to = DiffTarget::from_file(to, to_label)?;
        return Ok(render(mode, &from, &to, options));
    }

    debug!(from_size, to_size, "comparing by size only");
    if from_size == to_size {
        return Ok(String::new());
    }

    let summary = format!(
        "Files {from_label} and {to_label} differ in size ({from_size} vs {to_size} bytes)"
    );
    Ok(match mode {
        DiffMode::Unified => format!("{summary}\n"),
        DiffMode::Html => format!("<p class=\"diff_size\">{}</p>", html::escape_html(&summary)),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn pair() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child("big_a.txt").write_str(&"a\n".repeat(600)).unwrap();
        dir.child("big_b.txt").write_str(&"b\n".repeat(600)).unwrap();
        dir.child("longer.txt").write_str(&"b\n".repeat(700)).unwrap();
        dir.child("small_a.txt").write_str("small\n").unwrap();
        dir.child("small_b.txt").write_str("tiny\n").unwrap();
        dir
    }

    fn compare(dir: &TempDir, from: &str, to: &str, mode: DiffMode, options: &CompareOptions) -> String {
        compare_files(
            &dir.path().join(from),
            from.to_string(),
            &dir.path().join(to),
            to.to_string(),
            mode,
            options,
        )
        .unwrap()
    }

    fn capped(max_file_size: u64) -> CompareOptions {
        let mut options = CompareOptions::default();
        options.max_file_size = max_file_size;
        options
    }

    #[rstest]
    fn files_over_the_cap_with_equal_sizes_are_unchanged(pair: TempDir) {
        let options = capped(500);

        assert_eq!(compare(&pair, "big_a.txt", "big_b.txt", DiffMode::Unified, &options), "");
        assert_eq!(compare(&pair, "big_a.txt", "big_b.txt", DiffMode::Html, &options), "");
    }

    #[rstest]
    fn files_over_the_cap_with_different_sizes_get_a_summary(pair: TempDir) {
        let options = capped(500);

        assert_eq!(
            compare(&pair, "big_a.txt", "longer.txt", DiffMode::Unified, &options),
            "Files big_a.txt and longer.txt differ in size (1200 vs 1400 bytes)\n"
        );
        assert_eq!(
            compare(&pair, "big_a.txt", "longer.txt", DiffMode::Html, &options),
            "<p class=\"diff_size\">Files big_a.txt and longer.txt differ in size (1200 vs 1400 bytes)</p>"
        );
    }

    #[rstest]
    fn files_within_the_cap_are_diffed_by_line(pair: TempDir) {
        let diff = compare(&pair, "small_a.txt", "small_b.txt", DiffMode::Unified, &capped(500));

        assert_eq!(
            diff,
            "--- small_a.txt\n+++ small_b.txt\n@@ -1 +1 @@\n-small\n+tiny\n"
        );
    }

    #[rstest]
    fn ignored_contents_compare_sizes_only(pair: TempDir) {
        let mut options = CompareOptions::default();
        options.ignore_contents = true;

        assert_eq!(compare(&pair, "big_a.txt", "big_b.txt", DiffMode::Unified, &options), "");
        assert!(
            compare(&pair, "small_a.txt", "small_b.txt", DiffMode::Unified, &options)
                .starts_with("Files small_a.txt and small_b.txt differ in size")
        );
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = TempDir::new().unwrap();

        let result = compare_files(
            &dir.path().join("gone.txt"),
            "gone.txt".to_string(),
            &dir.path().join("gone.txt"),
            "gone.txt".to_string(),
            DiffMode::Unified,
            &CompareOptions::default(),
        );

        assert!(result.is_err());
    }
}
