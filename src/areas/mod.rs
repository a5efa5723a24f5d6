//! Comparison components
//!
//! - `comparison`: request-scoped entry point carrying the shared options
//! - `workspace`: one root directory, its file listing and file reading

pub mod comparison;
pub mod workspace;
