use crate::artifacts::results::diff_result::DiffResult;
use bitflags::bitflags;

bitflags! {
    /// Which kinds of results are printed.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct StatusFilter: u32 {
        const MODIFIED = 0b0001;
        const UNIQUE_LEFT = 0b0010;
        const UNIQUE_RIGHT = 0b0100;
        const ERRORED = 0b1000;
    }
}

impl StatusFilter {
    /// Parses status letters such as `"MLR"`. Unknown letters reject the
    /// whole filter.
    pub fn try_parse(s: &str) -> Option<Self> {
        let mut filter = Self::empty();

        for c in s.chars() {
            match c {
                'M' => filter |= Self::MODIFIED,
                'L' => filter |= Self::UNIQUE_LEFT,
                'R' => filter |= Self::UNIQUE_RIGHT,
                'E' => filter |= Self::ERRORED,
                _ => return None,
            }
        }

        Some(filter)
    }

    pub fn matches(&self, result: &DiffResult) -> bool {
        match result {
            DiffResult::Modified { .. } => self.contains(Self::MODIFIED),
            DiffResult::UniqueLeft { .. } => self.contains(Self::UNIQUE_LEFT),
            DiffResult::UniqueRight { .. } => self.contains(Self::UNIQUE_RIGHT),
            DiffResult::Errored { .. } => self.contains(Self::ERRORED),
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        Self::all()
    }
}
