use derive_new::new;
use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::hash::Hash;
use std::ops::Range;

/// Sequences at least this long get their most frequent elements excluded
/// from the anchor index.
pub const AUTOJUNK_MIN_LEN: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OpTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl OpTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpTag::Equal => "equal",
            OpTag::Insert => "insert",
            OpTag::Delete => "delete",
            OpTag::Replace => "replace",
        }
    }
}

/// One alignment instruction: `a` is the range in the left sequence, `b` the
/// range in the right sequence.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Opcode {
    pub tag: OpTag,
    pub a: Range<usize>,
    pub b: Range<usize>,
}

impl Opcode {
    pub fn is_equal(&self) -> bool {
        self.tag == OpTag::Equal
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct Match {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

pub trait DiffAlgorithm {
    /// Maximal runs of equal elements, ascending, terminated by a zero-sized
    /// sentinel at the end of both sequences.
    fn matching_blocks(&self) -> &[Match];

    /// Edit script covering both sequences without gaps or overlaps.
    fn opcodes(&self) -> Vec<Opcode>;
}

/// Longest-matching-block sequence aligner.
///
/// The longest run of equal elements anchors the alignment and the regions
/// on either side of it are aligned the same way, until no region has a
/// common element left. Elements rejected by the junk predicate, and popular
/// elements of long right-hand sequences, never start a match but may extend
/// one.
pub struct SequenceMatcher<'d, T> {
    a: &'d [T],
    b: &'d [T],
    b2j: HashMap<&'d T, Vec<usize>>,
    junk: HashSet<&'d T>,
    blocks: OnceCell<Vec<Match>>,
}

impl<'d, T: Eq + Hash> SequenceMatcher<'d, T> {
    pub fn new(a: &'d [T], b: &'d [T]) -> Self {
        Self::with_junk(a, b, |_| false)
    }

    pub fn with_junk(a: &'d [T], b: &'d [T], is_junk: impl Fn(&T) -> bool) -> Self {
        let mut b2j: HashMap<&'d T, Vec<usize>> = HashMap::new();
        for (j, element) in b.iter().enumerate() {
            b2j.entry(element).or_default().push(j);
        }

        let mut junk = HashSet::new();
        b2j.retain(|element, _| {
            if is_junk(element) {
                junk.insert(*element);
                false
            } else {
                true
            }
        });

        if b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            b2j.retain(|_, positions| positions.len() <= threshold);
        }

        SequenceMatcher {
            a,
            b,
            b2j,
            junk,
            blocks: OnceCell::new(),
        }
    }

    fn is_junk(&self, element: &T) -> bool {
        self.junk.contains(element)
    }

    /// Longest matching block within `a[alo..ahi]` and `b[blo..bhi]`.
    ///
    /// Ties go to the block starting earliest in `a`, then earliest in `b`.
    /// The block is then widened over adjacent equal non-junk elements and
    /// finally over adjacent equal junk elements.
    pub fn find_longest_match(&self, alo: usize, ahi: usize, blo: usize, bhi: usize) -> Match {
        let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

        // j2len[j] is the length of the match ending at a[i - 1] and b[j]
        let mut j2len: HashMap<usize, usize> = HashMap::new();
        for i in alo..ahi {
            let mut next_j2len = HashMap::new();
            if let Some(positions) = self.b2j.get(&self.a[i]) {
                for &j in positions {
                    if j < blo {
                        continue;
                    }
                    if j >= bhi {
                        break;
                    }

                    let k = j
                        .checked_sub(1)
                        .and_then(|prev| j2len.get(&prev))
                        .copied()
                        .unwrap_or(0)
                        + 1;
                    next_j2len.insert(j, k);

                    if k > best_size {
                        best_i = i + 1 - k;
                        best_j = j + 1 - k;
                        best_size = k;
                    }
                }
            }
            j2len = next_j2len;
        }

        while best_i > alo
            && best_j > blo
            && !self.is_junk(&self.b[best_j - 1])
            && self.a[best_i - 1] == self.b[best_j - 1]
        {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && !self.is_junk(&self.b[best_j + best_size])
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        while best_i > alo
            && best_j > blo
            && self.is_junk(&self.b[best_j - 1])
            && self.a[best_i - 1] == self.b[best_j - 1]
        {
            best_i -= 1;
            best_j -= 1;
            best_size += 1;
        }
        while best_i + best_size < ahi
            && best_j + best_size < bhi
            && self.is_junk(&self.b[best_j + best_size])
            && self.a[best_i + best_size] == self.b[best_j + best_size]
        {
            best_size += 1;
        }

        Match::new(best_i, best_j, best_size)
    }

    fn compute_matching_blocks(&self) -> Vec<Match> {
        let (la, lb) = (self.a.len(), self.b.len());

        let mut queue = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();
        while let Some((alo, ahi, blo, bhi)) = queue.pop() {
            let found = self.find_longest_match(alo, ahi, blo, bhi);
            if found.size == 0 {
                continue;
            }

            blocks.push(found);
            if alo < found.a && blo < found.b {
                queue.push((alo, found.a, blo, found.b));
            }
            if found.a + found.size < ahi && found.b + found.size < bhi {
                queue.push((found.a + found.size, ahi, found.b + found.size, bhi));
            }
        }
        blocks.sort();

        // fold blocks that touch into one
        let mut collapsed: Vec<Match> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match collapsed.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => collapsed.push(block),
            }
        }
        collapsed.push(Match::new(la, lb, 0));

        collapsed
    }

    /// Similarity in `[0, 1]`: twice the matched elements over the total.
    pub fn ratio(&self) -> f64 {
        let matches = self.matching_blocks().iter().map(|m| m.size).sum();
        similarity(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`ratio`](Self::ratio) from element multiplicities.
    pub fn quick_ratio(&self) -> f64 {
        let mut available: HashMap<&T, isize> = HashMap::new();
        for element in self.b {
            *available.entry(element).or_default() += 1;
        }

        let mut matches = 0;
        for element in self.a {
            let count = available.entry(element).or_default();
            if *count > 0 {
                matches += 1;
            }
            *count -= 1;
        }

        similarity(matches, self.a.len() + self.b.len())
    }

    /// Upper bound on [`quick_ratio`](Self::quick_ratio) from lengths alone.
    pub fn real_quick_ratio(&self) -> f64 {
        let (la, lb) = (self.a.len(), self.b.len());
        similarity(la.min(lb), la + lb)
    }
}

impl<T: Eq + Hash> DiffAlgorithm for SequenceMatcher<'_, T> {
    fn matching_blocks(&self) -> &[Match] {
        self.blocks.get_or_init(|| self.compute_matching_blocks())
    }

    fn opcodes(&self) -> Vec<Opcode> {
        let (la, lb) = (self.a.len(), self.b.len());
        let blocks = self.matching_blocks();

        // nothing in common: report the removal before the addition
        if blocks.len() == 1 && la > 0 && lb > 0 {
            return vec![
                Opcode::new(OpTag::Delete, 0..la, 0..0),
                Opcode::new(OpTag::Insert, la..la, 0..lb),
            ];
        }

        let mut opcodes = Vec::new();
        let (mut i, mut j) = (0, 0);
        for block in blocks {
            let tag = match (i < block.a, j < block.b) {
                (true, true) => Some(OpTag::Replace),
                (true, false) => Some(OpTag::Delete),
                (false, true) => Some(OpTag::Insert),
                (false, false) => None,
            };
            if let Some(tag) = tag {
                opcodes.push(Opcode::new(tag, i..block.a, j..block.b));
            }

            i = block.a + block.size;
            j = block.b + block.size;
            if block.size > 0 {
                opcodes.push(Opcode::new(OpTag::Equal, block.a..i, block.b..j));
            }
        }

        opcodes
    }
}

fn similarity(matches: usize, total: usize) -> f64 {
    if total == 0 {
        1.0
    } else {
        2.0 * matches as f64 / total as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn file_inputs() -> (Vec<&'static str>, Vec<&'static str>) {
        (
            vec!["line1", "line2", "line3", "line4"],
            vec!["line2", "line3_modified", "line4", "line5"],
        )
    }

    fn chars(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[rstest]
    fn opcodes_for_modified_file(file_inputs: (Vec<&'static str>, Vec<&'static str>)) {
        let (a, b) = file_inputs;
        let result = SequenceMatcher::new(&a, &b).opcodes();
        let expected = vec![
            Opcode::new(OpTag::Delete, 0..1, 0..0),
            Opcode::new(OpTag::Equal, 1..2, 0..1),
            Opcode::new(OpTag::Replace, 2..3, 1..2),
            Opcode::new(OpTag::Equal, 3..4, 2..3),
            Opcode::new(OpTag::Insert, 4..4, 3..4),
        ];

        assert_eq!(result, expected);
    }

    #[test]
    fn longest_match_prefers_earliest_block() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.find_longest_match(0, 5, 0, 9), Match::new(0, 4, 5));
    }

    #[test]
    fn junk_elements_do_not_anchor_a_match() {
        let a = chars(" abcd");
        let b = chars("abcd abcd");
        let matcher = SequenceMatcher::with_junk(&a, &b, |c| *c == ' ');

        assert_eq!(matcher.find_longest_match(0, 5, 0, 9), Match::new(1, 0, 4));
    }

    #[test]
    fn matching_blocks_end_with_sentinel() {
        let a = chars("abxcd");
        let b = chars("abcd");
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(
            matcher.matching_blocks(),
            &[Match::new(0, 0, 2), Match::new(3, 2, 2), Match::new(5, 4, 0)]
        );
    }

    #[test]
    fn empty_sequences_have_no_opcodes() {
        let empty: Vec<&str> = Vec::new();
        let matcher = SequenceMatcher::new(&empty, &empty);

        assert!(matcher.opcodes().is_empty());
        assert_eq!(matcher.ratio(), 1.0);
    }

    #[test]
    fn one_empty_side_is_a_pure_insert_or_delete() {
        let empty: Vec<&str> = Vec::new();
        let lines = vec!["a", "b"];

        assert_eq!(
            SequenceMatcher::new(&empty, &lines).opcodes(),
            vec![Opcode::new(OpTag::Insert, 0..0, 0..2)]
        );
        assert_eq!(
            SequenceMatcher::new(&lines, &empty).opcodes(),
            vec![Opcode::new(OpTag::Delete, 0..2, 0..0)]
        );
    }

    #[test]
    fn disjoint_sequences_delete_then_insert() {
        let a = vec!["a", "b", "c"];
        let b = vec!["x", "y"];

        assert_eq!(
            SequenceMatcher::new(&a, &b).opcodes(),
            vec![
                Opcode::new(OpTag::Delete, 0..3, 0..0),
                Opcode::new(OpTag::Insert, 3..3, 0..2),
            ]
        );
    }

    #[test]
    fn popular_lines_are_not_anchors_in_long_sequences() {
        // 300 lines, blank lines make up far more than 1% of them
        let a: Vec<String> = (0..300)
            .map(|i| if i % 2 == 0 { String::new() } else { format!("a{i}") })
            .collect();
        let b: Vec<String> = (0..300)
            .map(|i| if i % 2 == 0 { String::new() } else { format!("b{i}") })
            .collect();
        let matcher = SequenceMatcher::new(&a, &b);

        assert_eq!(matcher.find_longest_match(1, 300, 1, 300).size, 0);
    }

    #[test]
    fn ratios_are_ordered_upper_bounds() {
        let a = chars("private Thread currentThread;");
        let b = chars("private volatile Thread currentThread;");
        let matcher = SequenceMatcher::with_junk(&a, &b, |c| *c == ' ');

        let ratio = matcher.ratio();
        assert!(ratio > 0.8);
        assert!(matcher.quick_ratio() >= ratio);
        assert!(matcher.real_quick_ratio() >= matcher.quick_ratio());
    }

    #[test]
    fn identical_input_yields_identical_opcodes() {
        let a = vec!["x", "a", "b", "x", "c"];
        let b = vec!["a", "x", "b", "c", "x"];

        assert_eq!(
            SequenceMatcher::new(&a, &b).opcodes(),
            SequenceMatcher::new(&a, &b).opcodes()
        );
    }

    fn reconstruct(opcodes: &[Opcode], seq: &[u8], pick_a: bool) -> Vec<u8> {
        opcodes
            .iter()
            .flat_map(|op| {
                let range = if pick_a { op.a.clone() } else { op.b.clone() };
                seq[range].iter().copied()
            })
            .collect()
    }

    proptest! {
        #[test]
        fn prop_opcodes_reconstruct_both_sides(
            a in prop::collection::vec(0u8..6, 0..60),
            b in prop::collection::vec(0u8..6, 0..60),
        ) {
            let opcodes = SequenceMatcher::new(&a, &b).opcodes();

            prop_assert_eq!(reconstruct(&opcodes, &a, true), a.clone());
            prop_assert_eq!(reconstruct(&opcodes, &b, false), b.clone());
        }

        #[test]
        fn prop_opcodes_are_contiguous(
            a in prop::collection::vec(0u8..4, 0..40),
            b in prop::collection::vec(0u8..4, 0..40),
        ) {
            let opcodes = SequenceMatcher::new(&a, &b).opcodes();
            let (mut i, mut j) = (0, 0);
            for op in &opcodes {
                prop_assert_eq!(op.a.start, i);
                prop_assert_eq!(op.b.start, j);
                if op.is_equal() {
                    prop_assert_eq!(&a[op.a.clone()], &b[op.b.clone()]);
                }
                i = op.a.end;
                j = op.b.end;
            }
            prop_assert_eq!((i, j), (a.len(), b.len()));
        }

        #[test]
        fn prop_disjoint_inputs_delete_then_insert(
            a in prop::collection::vec(0u8..5, 1..30),
            b in prop::collection::vec(5u8..10, 1..30),
        ) {
            let opcodes = SequenceMatcher::new(&a, &b).opcodes();

            prop_assert_eq!(opcodes, vec![
                Opcode::new(OpTag::Delete, 0..a.len(), 0..0),
                Opcode::new(OpTag::Insert, a.len()..a.len(), 0..b.len()),
            ]);
        }
    }
}
