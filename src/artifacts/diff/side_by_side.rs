use crate::artifacts::core::options::CompareOptions;
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::matcher::{DiffAlgorithm, OpTag, Opcode, SequenceMatcher};
use derive_new::new;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Emphasis {
    None,
    Added,
    Removed,
    Changed,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Segment {
    pub text: String,
    pub emphasis: Emphasis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineNumber {
    Line(usize),
    /// A soft-wrapped continuation of the line above.
    Continuation,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Cell {
    pub number: LineNumber,
    pub segments: Vec<Segment>,
}

impl Cell {
    pub fn text(&self) -> String {
        self.segments.iter().map(|s| s.text.as_str()).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Row {
    pub left: Option<Cell>,
    pub right: Option<Cell>,
    pub changed: bool,
}

/// How a region of a replace opcode lines up, found by pairing similar lines.
#[derive(Debug)]
enum Pairing {
    /// Lines compared equal under the options but were not matched as an
    /// anchor.
    Same { a: usize, b: usize },
    /// Similar enough to show character-level differences.
    Similar { a: usize, b: usize },
    /// Nothing similar: removed lines facing added lines.
    Unrelated { a: Range<usize>, b: Range<usize> },
}

enum Task {
    Region { a: Range<usize>, b: Range<usize> },
    Emit(Pairing),
}

/// Two-column view of a comparison, one row per displayed line pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideBySideTable {
    from_desc: String,
    to_desc: String,
    rows: Vec<Row>,
}

impl SideBySideTable {
    pub fn build(from: &DiffTarget, to: &DiffTarget, options: &CompareOptions) -> Self {
        let builder = TableBuilder::new(from, to, options);
        let rows = builder
            .rows()
            .into_iter()
            .flat_map(|row| wrap_row(row, options.wrap_column))
            .collect();

        SideBySideTable {
            from_desc: from.label().to_string(),
            to_desc: to.label().to_string(),
            rows,
        }
    }

    pub fn from_desc(&self) -> &str {
        &self.from_desc
    }

    pub fn to_desc(&self) -> &str {
        &self.to_desc
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn changed_rows(&self) -> usize {
        self.rows.iter().filter(|row| row.changed).count()
    }
}

struct TableBuilder<'d> {
    keys_a: Vec<&'d str>,
    keys_b: Vec<&'d str>,
    text_a: Vec<Vec<char>>,
    text_b: Vec<Vec<char>>,
    cutoff: f64,
}

impl<'d> TableBuilder<'d> {
    fn new(from: &'d DiffTarget, to: &'d DiffTarget, options: &CompareOptions) -> Self {
        let display = |target: &DiffTarget| {
            target
                .lines()
                .lines()
                .iter()
                .map(|line| expand_tabs(line.trim_end_matches(['\n', '\r']), options.tab_size))
                .collect::<Vec<_>>()
        };

        TableBuilder {
            keys_a: from.lines().keys(options),
            keys_b: to.lines().keys(options),
            text_a: display(from),
            text_b: display(to),
            cutoff: options.intraline_cutoff,
        }
    }

    fn rows(&self) -> Vec<Row> {
        let opcodes = SequenceMatcher::new(&self.keys_a, &self.keys_b).opcodes();

        let mut rows = Vec::new();
        let mut pending: Option<Opcode> = None;
        for op in opcodes {
            // a removal right before an addition is laid out like a replace
            if let Some(delete) = pending.take() {
                if op.tag == OpTag::Insert {
                    self.push_replace(&mut rows, delete.a, op.b);
                    continue;
                }
                self.push_opcode(&mut rows, delete);
            }

            if op.tag == OpTag::Delete {
                pending = Some(op);
            } else {
                self.push_opcode(&mut rows, op);
            }
        }
        if let Some(delete) = pending {
            self.push_opcode(&mut rows, delete);
        }

        rows
    }

    fn push_opcode(&self, rows: &mut Vec<Row>, op: Opcode) {
        match op.tag {
            OpTag::Equal => {
                for (i, j) in op.a.zip(op.b) {
                    rows.push(self.same_row(i, j));
                }
            }
            OpTag::Delete => {
                for i in op.a {
                    rows.push(Row::new(Some(self.whole_cell_a(i)), None, true));
                }
            }
            OpTag::Insert => {
                for j in op.b {
                    rows.push(Row::new(None, Some(self.whole_cell_b(j)), true));
                }
            }
            OpTag::Replace => self.push_replace(rows, op.a, op.b),
        }
    }

    fn push_replace(&self, rows: &mut Vec<Row>, a: Range<usize>, b: Range<usize>) {
        for pairing in self.pair_lines(a, b) {
            match pairing {
                Pairing::Same { a, b } => rows.push(self.same_row(a, b)),
                Pairing::Similar { a, b } => rows.push(self.intraline_row(a, b)),
                Pairing::Unrelated { a, b } => {
                    let (a_len, b_len) = (a.len(), b.len());
                    for k in 0..a_len.max(b_len) {
                        let left = (k < a_len).then(|| self.whole_cell_a(a.start + k));
                        let right = (k < b_len).then(|| self.whole_cell_b(b.start + k));
                        rows.push(Row::new(left, right, true));
                    }
                }
            }
        }
    }

    /// Lines up a replaced region.
    ///
    /// The most similar line pair at or above the cutoff anchors the region
    /// and the parts before and after it are paired the same way. Without
    /// such a pair, an identical pair is used as the anchor, and without that
    /// the whole region is unrelated.
    fn pair_lines(&self, a: Range<usize>, b: Range<usize>) -> Vec<Pairing> {
        let mut pairings = Vec::new();
        let mut tasks = vec![Task::Region { a, b }];

        while let Some(task) = tasks.pop() {
            let (a, b) = match task {
                Task::Emit(pairing) => {
                    pairings.push(pairing);
                    continue;
                }
                Task::Region { a, b } => (a, b),
            };

            if a.is_empty() && b.is_empty() {
                continue;
            }
            if a.is_empty() || b.is_empty() {
                pairings.push(Pairing::Unrelated { a, b });
                continue;
            }

            let Some((i, j, similar)) = self.anchor(a.clone(), b.clone()) else {
                pairings.push(Pairing::Unrelated { a, b });
                continue;
            };
            let anchor = if similar {
                Pairing::Similar { a: i, b: j }
            } else {
                Pairing::Same { a: i, b: j }
            };

            // pushed in reverse so the regions come out in order
            tasks.push(Task::Region {
                a: i + 1..a.end,
                b: j + 1..b.end,
            });
            tasks.push(Task::Emit(anchor));
            tasks.push(Task::Region {
                a: a.start..i,
                b: b.start..j,
            });
        }

        pairings
    }

    /// The anchor of a region as `(a, b, similar)`.
    fn anchor(&self, a: Range<usize>, b: Range<usize>) -> Option<(usize, usize, bool)> {
        let mut best: Option<(f64, usize, usize)> = None;
        let mut first_same = None;

        for j in b {
            for i in a.clone() {
                if self.keys_a[i] == self.keys_b[j] {
                    first_same.get_or_insert((i, j));
                    continue;
                }

                let best_ratio = best.map_or(0.0, |(ratio, _, _)| ratio);
                let cruncher = char_matcher(&self.text_a[i], &self.text_b[j]);
                if cruncher.real_quick_ratio() > best_ratio
                    && cruncher.quick_ratio() > best_ratio
                    && cruncher.ratio() > best_ratio
                {
                    best = Some((cruncher.ratio(), i, j));
                }
            }
        }

        match (best, first_same) {
            (Some((ratio, i, j)), _) if ratio >= self.cutoff => Some((i, j, true)),
            (_, Some((i, j))) => Some((i, j, false)),
            _ => None,
        }
    }

    fn same_row(&self, i: usize, j: usize) -> Row {
        Row::new(
            Some(plain_cell(i, &self.text_a[i], Emphasis::None)),
            Some(plain_cell(j, &self.text_b[j], Emphasis::None)),
            false,
        )
    }

    fn whole_cell_a(&self, i: usize) -> Cell {
        plain_cell(i, &self.text_a[i], Emphasis::Removed)
    }

    fn whole_cell_b(&self, j: usize) -> Cell {
        plain_cell(j, &self.text_b[j], Emphasis::Added)
    }

    fn intraline_row(&self, i: usize, j: usize) -> Row {
        let (a, b) = (&self.text_a[i], &self.text_b[j]);
        let mut left = Vec::new();
        let mut right = Vec::new();

        for op in char_matcher(a, b).opcodes() {
            let (left_emphasis, right_emphasis) = match op.tag {
                OpTag::Equal => (Emphasis::None, Emphasis::None),
                OpTag::Replace => (Emphasis::Changed, Emphasis::Changed),
                OpTag::Delete => (Emphasis::Removed, Emphasis::None),
                OpTag::Insert => (Emphasis::None, Emphasis::Added),
            };
            push_segment(&mut left, &a[op.a], left_emphasis);
            push_segment(&mut right, &b[op.b], right_emphasis);
        }

        Row::new(
            Some(Cell::new(LineNumber::Line(i + 1), left)),
            Some(Cell::new(LineNumber::Line(j + 1), right)),
            true,
        )
    }
}

fn char_matcher<'c>(a: &'c [char], b: &'c [char]) -> SequenceMatcher<'c, char> {
    SequenceMatcher::with_junk(a, b, |c| *c == ' ' || *c == '\t')
}

fn plain_cell(index: usize, text: &[char], emphasis: Emphasis) -> Cell {
    let mut segments = Vec::new();
    push_segment(&mut segments, text, emphasis);
    Cell::new(LineNumber::Line(index + 1), segments)
}

fn push_segment(segments: &mut Vec<Segment>, text: &[char], emphasis: Emphasis) {
    if text.is_empty() {
        return;
    }

    match segments.last_mut() {
        Some(last) if last.emphasis == emphasis => last.text.extend(text),
        _ => segments.push(Segment::new(text.iter().collect(), emphasis)),
    }
}

fn expand_tabs(line: &str, tab_size: usize) -> Vec<char> {
    let mut expanded = Vec::with_capacity(line.len());
    for c in line.chars() {
        if c == '\t' && tab_size > 0 {
            let pad = tab_size - expanded.len() % tab_size;
            expanded.extend(std::iter::repeat_n(' ', pad));
        } else {
            expanded.push(c);
        }
    }
    expanded
}

/// Splits a row whose cells are wider than `width` characters into the row
/// itself followed by continuation rows.
fn wrap_row(row: Row, width: usize) -> Vec<Row> {
    if width == 0 {
        return vec![row];
    }

    let left = row.left.map(|cell| wrap_cell(cell, width));
    let right = row.right.map(|cell| wrap_cell(cell, width));
    let count = left
        .as_ref()
        .map_or(1, Vec::len)
        .max(right.as_ref().map_or(1, Vec::len));

    let mut left = left.map(|cells| cells.into_iter());
    let mut right = right.map(|cells| cells.into_iter());
    (0..count)
        .map(|_| {
            Row::new(
                left.as_mut().and_then(Iterator::next),
                right.as_mut().and_then(Iterator::next),
                row.changed,
            )
        })
        .collect()
}

fn wrap_cell(cell: Cell, width: usize) -> Vec<Cell> {
    let mut lines: Vec<Vec<Segment>> = vec![Vec::new()];
    let mut used = 0;

    for segment in cell.segments {
        let chars: Vec<char> = segment.text.chars().collect();
        let mut rest = chars.as_slice();
        while !rest.is_empty() {
            if used == width {
                lines.push(Vec::new());
                used = 0;
            }

            let (head, tail) = rest.split_at((width - used).min(rest.len()));
            if let Some(line) = lines.last_mut() {
                push_segment(line, head, segment.emphasis);
            }
            used += head.len();
            rest = tail;
        }
    }

    lines
        .into_iter()
        .enumerate()
        .map(|(k, segments)| {
            let number = if k == 0 {
                cell.number
            } else {
                LineNumber::Continuation
            };
            Cell::new(number, segments)
        })
        .collect()
}
