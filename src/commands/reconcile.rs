use crate::areas::comparison::Comparison;
use crate::areas::workspace::Workspace;
use crate::artifacts::core::error::DispatchError;
use crate::artifacts::core::options::{CompareOptions, DiffMode};
use crate::artifacts::diff::diff_target::DiffTarget;
use crate::artifacts::diff::{compare_files, unified};
use crate::artifacts::results::diff_result::DiffResult;
use std::path::Path;
use tokio::task::{self, JoinSet};
use tracing::{debug, instrument};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Both,
    Left,
    Right,
}

/// One file to compare, in its final output position.
#[derive(Debug, Clone)]
struct FileJob {
    side: Side,
    file: String,
    left: Workspace,
    right: Workspace,
}

impl FileJob {
    fn run(&self, mode: DiffMode, options: &CompareOptions) -> DiffResult {
        match self.side {
            Side::Both => self.compare(mode, options),
            Side::Left => self.one_sided(&self.left, mode, options),
            Side::Right => self.one_sided(&self.right, mode, options),
        }
    }

    fn compare(&self, mode: DiffMode, options: &CompareOptions) -> DiffResult {
        let diff = compare_files(
            &self.left.file_path(&self.file),
            self.left.label(&self.file, mode),
            &self.right.file_path(&self.file),
            self.right.label(&self.file, mode),
            mode,
            options,
        );

        match diff {
            Ok(diff) => DiffResult::Modified {
                file: self.file.clone(),
                diff,
            },
            Err(e) => DiffResult::Errored {
                file: self.file.clone(),
                error: format!("Could not compare file: {e}"),
            },
        }
    }

    fn one_sided(&self, root: &Workspace, mode: DiffMode, options: &CompareOptions) -> DiffResult {
        let read_error = |e: std::io::Error| DiffResult::Errored {
            file: self.file.clone(),
            error: format!("Could not read file: {e}"),
        };

        let size = match std::fs::metadata(root.file_path(&self.file)) {
            Ok(metadata) => metadata.len(),
            Err(e) => return read_error(e),
        };

        // files compared by size alone carry no payload
        let target = if options.reads_contents(size) {
            match root.read_target(&self.file, mode) {
                Ok(target) => Some(target),
                Err(e) => return read_error(e),
            }
        } else {
            None
        };

        // side-by-side output has no one-column table for a lone file
        let diff = match (mode, target) {
            (DiffMode::Unified, Some(target)) if self.side == Side::Left => Some(
                unified::unified_diff(&target, &DiffTarget::from_nothing(), options),
            ),
            (DiffMode::Unified, Some(target)) => Some(unified::unified_diff(
                &DiffTarget::from_nothing(),
                &target,
                options,
            )),
            _ => None,
        };

        let file = self.file.clone();
        if self.side == Side::Left {
            DiffResult::UniqueLeft { file, diff }
        } else {
            DiffResult::UniqueRight { file, diff }
        }
    }
}

impl Comparison {
    /// Compares two directory trees file by file.
    ///
    /// Results for common files come first, then files only on the left,
    /// then files only on the right, each group sorted by path. Unique files
    /// are left out entirely unless `include_unique` is set.
    #[instrument(skip(self, left, right), fields(left = %left.display(), right = %right.display()))]
    pub fn reconcile(
        &self,
        left: &Path,
        right: &Path,
        mode: DiffMode,
        include_unique: bool,
    ) -> Result<Vec<DiffResult>, DispatchError> {
        let left = Workspace::new(left.into());
        let right = Workspace::new(right.into());

        let results = self
            .plan(&left, &right, include_unique)?
            .iter()
            .map(|job| job.run(mode, self.options()))
            .collect();

        Ok(results)
    }

    /// Same contract as [`Comparison::reconcile`], with the per-file work
    /// spread over the blocking thread pool.
    #[instrument(skip(self, left, right), fields(left = %left.display(), right = %right.display()))]
    pub async fn reconcile_concurrent(
        &self,
        left: &Path,
        right: &Path,
        mode: DiffMode,
        include_unique: bool,
    ) -> Result<Vec<DiffResult>, DispatchError> {
        let comparison = self.clone();
        let left = Workspace::new(left.into());
        let right = Workspace::new(right.into());
        let plan =
            task::spawn_blocking(move || comparison.plan(&left, &right, include_unique)).await??;

        let total = plan.len();
        let mut workers = JoinSet::new();
        for (slot, job) in plan.into_iter().enumerate() {
            let options = self.shared_options();
            workers.spawn_blocking(move || (slot, job.run(mode, &options)));
        }

        let mut slots = Vec::with_capacity(total);
        while let Some(joined) = workers.join_next().await {
            slots.push(joined?);
        }
        slots.sort_by_key(|(slot, _)| *slot);

        Ok(slots.into_iter().map(|(_, result)| result).collect())
    }

    /// Every file to compare, already in output order.
    fn plan(
        &self,
        left: &Workspace,
        right: &Workspace,
        include_unique: bool,
    ) -> Result<Vec<FileJob>, DispatchError> {
        let left_files = left.list_files(self.options())?;
        let right_files = right.list_files(self.options())?;
        let triple = left_files.partition(&right_files);

        debug!(
            common = triple.common.len(),
            left_only = triple.left_only.len(),
            right_only = triple.right_only.len(),
            "partitioned trees"
        );

        let job = |side: Side| {
            move |file: String| FileJob {
                side,
                file,
                left: left.clone(),
                right: right.clone(),
            }
        };

        let mut jobs: Vec<FileJob> = triple.common.into_iter().map(job(Side::Both)).collect();
        if include_unique {
            jobs.extend(triple.left_only.into_iter().map(job(Side::Left)));
            jobs.extend(triple.right_only.into_iter().map(job(Side::Right)));
        }

        Ok(jobs)
    }
}
