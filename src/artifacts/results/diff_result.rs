use serde::Serialize;

/// The outcome of comparing one file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status")]
pub enum DiffResult {
    #[serde(rename = "modified")]
    Modified { file: String, diff: String },
    #[serde(rename = "unique_to_left")]
    UniqueLeft {
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        diff: Option<String>,
    },
    #[serde(rename = "unique_to_right")]
    UniqueRight {
        file: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        diff: Option<String>,
    },
    #[serde(rename = "error")]
    Errored { file: String, error: String },
}

impl DiffResult {
    pub fn file(&self) -> &str {
        match self {
            DiffResult::Modified { file, .. }
            | DiffResult::UniqueLeft { file, .. }
            | DiffResult::UniqueRight { file, .. }
            | DiffResult::Errored { file, .. } => file,
        }
    }

    pub fn diff(&self) -> Option<&str> {
        match self {
            DiffResult::Modified { diff, .. } => Some(diff),
            DiffResult::UniqueLeft { diff, .. } | DiffResult::UniqueRight { diff, .. } => {
                diff.as_deref()
            }
            DiffResult::Errored { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            DiffResult::Errored { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn status(&self) -> &'static str {
        match self {
            DiffResult::Modified { .. } => "modified",
            DiffResult::UniqueLeft { .. } => "unique_to_left",
            DiffResult::UniqueRight { .. } => "unique_to_right",
            DiffResult::Errored { .. } => "error",
        }
    }

    pub fn status_char(&self) -> char {
        match self {
            DiffResult::Modified { .. } => 'M',
            DiffResult::UniqueLeft { .. } => 'L',
            DiffResult::UniqueRight { .. } => 'R',
            DiffResult::Errored { .. } => 'E',
        }
    }

    pub fn is_unique(&self) -> bool {
        matches!(
            self,
            DiffResult::UniqueLeft { .. } | DiffResult::UniqueRight { .. }
        )
    }
}
