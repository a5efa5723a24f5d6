//! Comparison data structures and algorithms
//!
//! - `core`: Shared types (options, request errors, pager wrapper)
//! - `diff`: Line matching and diff rendering (unified text, side-by-side HTML)
//! - `results`: Per-file results and the status filter
//! - `tree`: Path sets of directory trees and input classification

pub mod core;
pub mod diff;
pub mod results;
pub mod tree;
