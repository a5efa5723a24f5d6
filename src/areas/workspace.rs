use crate::artifacts::core::error::DispatchError;
use crate::artifacts::core::options::{CompareOptions, DiffMode};
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::tree::path_set::PathSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// One root directory taking part in a tree comparison.
#[derive(Debug, Clone)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Every file below the root as a forward-slash path relative to it.
    ///
    /// Entries matching an exclude pattern are pruned, directories included.
    /// Unreadable entries below the root, and files whose relative path is
    /// not valid UTF-8, are skipped with a warning; failing to read the root
    /// itself fails the walk.
    pub fn list_files(&self, options: &CompareOptions) -> Result<PathSet, DispatchError> {
        let mut files = PathSet::default();

        let walker = WalkDir::new(&self.path)
            .min_depth(1)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| {
                entry.depth() == 0
                    || !self
                        .relative_path(entry.path())
                        .is_some_and(|path| options.is_excluded(&path))
            });

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => {
                    return Err(DispatchError::Walk {
                        path: self.path.to_path_buf(),
                        source: err,
                    });
                }
                Err(err) => {
                    warn!(root = %self.path.display(), error = %err, "skipping unreadable entry");
                    continue;
                }
            };

            // follows symlinks, so linked files take part like regular ones
            if !entry.path().is_file() {
                continue;
            }
            match self.relative_path(entry.path()) {
                Some(path) => {
                    files.insert(path);
                }
                None => {
                    warn!(path = %entry.path().display(), "skipping file with a non UTF-8 name");
                }
            }
        }

        debug!(root = %self.path.display(), files = files.len(), "listed files");
        Ok(files)
    }

    fn relative_path(&self, path: &Path) -> Option<String> {
        let components = path
            .strip_prefix(&self.path)
            .unwrap_or(path)
            .components()
            .map(|component| component.as_os_str().to_str())
            .collect::<Option<Vec<_>>>()?;

        Some(components.join("/"))
    }

    pub fn file_path(&self, relative_path: &str) -> PathBuf {
        self.path.join(relative_path)
    }

    /// How a file under this root is labelled: a per-file header line in
    /// unified output, a per-root column description in side-by-side output.
    pub fn label(&self, relative_path: &str, mode: DiffMode) -> String {
        match mode {
            DiffMode::Unified => format!("File in {}/{}", self.path.display(), relative_path),
            DiffMode::Html => format!("File in {}", self.path.display()),
        }
    }

    pub fn read_target(&self, relative_path: &str, mode: DiffMode) -> std::io::Result<DiffTarget> {
        DiffTarget::from_file(
            &self.file_path(relative_path),
            self.label(relative_path, mode),
        )
    }
}
