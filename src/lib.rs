//! Compare two files or two directory trees and report per-file differences
//! as unified diffs or side-by-side HTML tables.
//!
//! ```no_run
//! use litediff::{DiffMode, dispatch};
//! use std::path::Path;
//!
//! let results = dispatch(Path::new("left"), Path::new("right"), DiffMode::Unified, true)?;
//! for result in &results {
//!     println!("{} {}", result.status(), result.file());
//! }
//! # Ok::<(), litediff::DispatchError>(())
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::comparison::Comparison;
pub use artifacts::core::error::{DispatchError, ErrorKind};
pub use artifacts::core::options::{CompareOptions, DiffMode};
pub use artifacts::results::diff_result::DiffResult;
pub use commands::dispatch::dispatch;
