//! Per-file comparison results and how they are selected for output

pub mod diff_result;
pub mod status_filter;
