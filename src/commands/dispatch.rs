use crate::areas::comparison::Comparison;
use crate::artifacts::core::error::DispatchError;
use crate::artifacts::core::options::DiffMode;
use crate::artifacts::diff::compare_files;
use crate::artifacts::results::diff_result::DiffResult;
use crate::artifacts::tree::path_kind::Route;
use std::path::Path;
use tracing::{debug, instrument};

/// Compares two paths with default options.
///
/// Two directories are reconciled file by file, two files are compared
/// directly. See [`Comparison::dispatch`].
pub fn dispatch(
    path_left: &Path,
    path_right: &Path,
    mode: DiffMode,
    include_unique: bool,
) -> Result<Vec<DiffResult>, DispatchError> {
    Comparison::default().dispatch(path_left, path_right, mode, include_unique)
}

impl Comparison {
    #[instrument(skip(self, path_left, path_right), fields(left = %path_left.display(), right = %path_right.display()))]
    pub fn dispatch(
        &self,
        path_left: &Path,
        path_right: &Path,
        mode: DiffMode,
        include_unique: bool,
    ) -> Result<Vec<DiffResult>, DispatchError> {
        match Route::classify(path_left, path_right)? {
            Route::Directories { left, right } => {
                self.reconcile(&left, &right, mode, include_unique)
            }
            Route::Files { left, right } => Ok(vec![self.diff_files(&left, &right, mode)]),
        }
    }

    pub async fn dispatch_concurrent(
        &self,
        path_left: &Path,
        path_right: &Path,
        mode: DiffMode,
        include_unique: bool,
    ) -> Result<Vec<DiffResult>, DispatchError> {
        match Route::classify(path_left, path_right)? {
            Route::Directories { left, right } => {
                self.reconcile_concurrent(&left, &right, mode, include_unique)
                    .await
            }
            Route::Files { left, right } => Ok(vec![self.diff_files(&left, &right, mode)]),
        }
    }

    /// Compares two single files, labelled by the paths as given and named
    /// `"<left name> vs <right name>"`.
    pub fn diff_files(&self, left: &Path, right: &Path, mode: DiffMode) -> DiffResult {
        let file = format!("{} vs {}", base_name(left), base_name(right));
        debug!(%file, %mode, "comparing files");

        let diff = compare_files(
            left,
            left.display().to_string(),
            right,
            right.display().to_string(),
            mode,
            self.options(),
        );

        match diff {
            Ok(diff) => DiffResult::Modified { file, diff },
            Err(e) => DiffResult::Errored {
                file,
                error: format!("Could not compare file: {e}"),
            },
        }
    }
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
