use crate::artifacts::core::options::CompareOptions;
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::hunk::Hunk;
use crate::artifacts::diff::matcher::{DiffAlgorithm, OpTag, SequenceMatcher};

const NO_NEWLINE_MARKER: &str = "\\ No newline at end of file\n";

/// Renders `from` against `to` as a unified diff.
///
/// Returns an empty string when the two sides have no differences, so the
/// caller can test for "no changes" without parsing anything.
pub fn unified_diff(from: &DiffTarget, to: &DiffTarget, options: &CompareOptions) -> String {
    let a = from.lines().keys(options);
    let b = to.lines().keys(options);
    let opcodes = SequenceMatcher::new(&a, &b).opcodes();

    let hunks = Hunk::group(&opcodes, options.context);
    if hunks.is_empty() {
        return String::new();
    }

    let (a_lines, b_lines) = (from.lines().lines(), to.lines().lines());
    let mut diff = format!("--- {}\n+++ {}\n", from.label(), to.label());
    for hunk in &hunks {
        diff.push_str(&hunk.header());
        diff.push('\n');

        for op in hunk.opcodes() {
            match op.tag {
                OpTag::Equal => push_lines(&mut diff, ' ', &a_lines[op.a.clone()]),
                OpTag::Delete => push_lines(&mut diff, '-', &a_lines[op.a.clone()]),
                OpTag::Insert => push_lines(&mut diff, '+', &b_lines[op.b.clone()]),
                OpTag::Replace => {
                    push_lines(&mut diff, '-', &a_lines[op.a.clone()]);
                    push_lines(&mut diff, '+', &b_lines[op.b.clone()]);
                }
            }
        }
    }

    diff
}

fn push_lines(diff: &mut String, marker: char, lines: &[String]) {
    for line in lines {
        diff.push(marker);
        diff.push_str(line);
        if !line.ends_with('\n') {
            diff.push('\n');
            diff.push_str(NO_NEWLINE_MARKER);
        }
    }
}
