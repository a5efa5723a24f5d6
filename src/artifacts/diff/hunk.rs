use crate::artifacts::diff::matcher::{OpTag, Opcode};
use derive_new::new;
use std::ops::Range;

/// A run of opcodes shown together in a unified diff: the changes plus at most
/// `context` equal lines on each side.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Hunk {
    opcodes: Vec<Opcode>,
}

impl Hunk {
    /// Splits an edit script into hunks.
    ///
    /// Equal runs longer than twice the context separate hunks. An edit
    /// script without any change produces no hunk at all.
    pub fn group(opcodes: &[Opcode], context: usize) -> Vec<Hunk> {
        let mut codes = opcodes.to_vec();
        if codes.is_empty() {
            return Vec::new();
        }

        if let Some(first) = codes.first_mut()
            && first.is_equal()
        {
            first.a.start = first.a.start.max(first.a.end.saturating_sub(context));
            first.b.start = first.b.start.max(first.b.end.saturating_sub(context));
        }
        if let Some(last) = codes.last_mut()
            && last.is_equal()
        {
            last.a.end = last.a.end.min(last.a.start.saturating_add(context));
            last.b.end = last.b.end.min(last.b.start.saturating_add(context));
        }

        let mut hunks = Vec::new();
        let mut group = Vec::new();
        for mut code in codes {
            if code.is_equal() && code.a.len() > context.saturating_mul(2) {
                group.push(Opcode::new(
                    OpTag::Equal,
                    code.a.start..code.a.end.min(code.a.start.saturating_add(context)),
                    code.b.start..code.b.end.min(code.b.start.saturating_add(context)),
                ));
                hunks.push(Hunk::new(std::mem::take(&mut group)));

                code.a.start = code.a.start.max(code.a.end.saturating_sub(context));
                code.b.start = code.b.start.max(code.b.end.saturating_sub(context));
            }
            group.push(code);
        }

        if !(group.is_empty() || (group.len() == 1 && group[0].is_equal())) {
            hunks.push(Hunk::new(group));
        }

        hunks
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn a_range(&self) -> Range<usize> {
        self.span(|op| &op.a)
    }

    pub fn b_range(&self) -> Range<usize> {
        self.span(|op| &op.b)
    }

    fn span(&self, side: impl Fn(&Opcode) -> &Range<usize>) -> Range<usize> {
        match (self.opcodes.first(), self.opcodes.last()) {
            (Some(first), Some(last)) => side(first).start..side(last).end,
            _ => 0..0,
        }
    }

    /// `@@ -start,len +start,len @@`, one-based, with the length left out
    /// when it is one.
    pub fn header(&self) -> String {
        format!(
            "@@ -{} +{} @@",
            format_range(self.a_range()),
            format_range(self.b_range())
        )
    }
}

fn format_range(range: Range<usize>) -> String {
    let length = range.len();
    match length {
        0 => format!("{},0", range.start),
        1 => format!("{}", range.start + 1),
        _ => format!("{},{}", range.start + 1, length),
    }
}
