use serde::Serialize;
use std::path::PathBuf;

/// Failures that abort a whole comparison request.
///
/// Problems with individual files never end up here; they are reported as
/// per-file error results instead.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Please provide paths for both inputs.")]
    InvalidInput,
    #[error("Invalid path: {}. The path does not exist.", .0.display())]
    NotFound(PathBuf),
    #[error("Mismatched types: Please provide two files or two directories to compare.")]
    MismatchedKinds { left: PathBuf, right: PathBuf },
    #[error("Could not list files under {}: {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
    #[error("Comparison worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    InvalidInput,
    NotFound,
    MismatchedKinds,
    Unexpected,
}

impl DispatchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DispatchError::InvalidInput => ErrorKind::InvalidInput,
            DispatchError::NotFound(_) => ErrorKind::NotFound,
            DispatchError::MismatchedKinds { .. } => ErrorKind::MismatchedKinds,
            DispatchError::Walk { .. } | DispatchError::Worker(_) => ErrorKind::Unexpected,
        }
    }

    /// Whether the caller supplied bad input, as opposed to the comparison
    /// itself failing.
    pub fn is_client_error(&self) -> bool {
        self.kind() != ErrorKind::Unexpected
    }
}
