use crate::artifacts::core::error::DispatchError;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathKind {
    File,
    Directory,
    Other,
}

impl PathKind {
    /// `None` when nothing exists at `path`.
    pub fn detect(path: &Path) -> Option<Self> {
        let metadata = std::fs::metadata(path).ok()?;
        Some(if metadata.is_dir() {
            PathKind::Directory
        } else if metadata.is_file() {
            PathKind::File
        } else {
            PathKind::Other
        })
    }
}

/// What a pair of top-level inputs should be compared as.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Files { left: PathBuf, right: PathBuf },
    Directories { left: PathBuf, right: PathBuf },
}

impl Route {
    pub fn classify(left: &Path, right: &Path) -> Result<Self, DispatchError> {
        if left.as_os_str().is_empty() || right.as_os_str().is_empty() {
            return Err(DispatchError::InvalidInput);
        }

        let left_kind =
            PathKind::detect(left).ok_or_else(|| DispatchError::NotFound(left.to_path_buf()))?;
        let right_kind =
            PathKind::detect(right).ok_or_else(|| DispatchError::NotFound(right.to_path_buf()))?;

        let (left, right) = (left.to_path_buf(), right.to_path_buf());
        match (left_kind, right_kind) {
            (PathKind::Directory, PathKind::Directory) => Ok(Route::Directories { left, right }),
            (PathKind::File, PathKind::File) => Ok(Route::Files { left, right }),
            _ => Err(DispatchError::MismatchedKinds { left, right }),
        }
    }
}
