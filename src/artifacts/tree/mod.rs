//! Directory tree comparison
//!
//! - `path_set`: relative file paths of one tree and how two of them overlap
//! - `path_kind`: classification of the two top-level inputs

pub mod path_kind;
pub mod path_set;
