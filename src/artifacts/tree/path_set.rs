use std::collections::BTreeSet;

/// Root-relative, forward-slash file paths found under one side.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathSet(BTreeSet<String>);

/// How two path sets overlap. Each list is sorted ascending and together
/// they hold every path of both sets exactly once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComparisonTriple {
    pub common: Vec<String>,
    pub left_only: Vec<String>,
    pub right_only: Vec<String>,
}

impl PathSet {
    pub fn insert(&mut self, path: String) -> bool {
        self.0.insert(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn partition(&self, right: &PathSet) -> ComparisonTriple {
        ComparisonTriple {
            common: self.0.intersection(&right.0).cloned().collect(),
            left_only: self.0.difference(&right.0).cloned().collect(),
            right_only: right.0.difference(&self.0).cloned().collect(),
        }
    }
}

impl FromIterator<String> for PathSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        PathSet(iter.into_iter().collect())
    }
}
