//! Comparison operations
//!
//! - `dispatch`: classify the two inputs and compare them as files or trees
//! - `reconcile`: compare two directory trees, sequentially or on a worker pool
//! - `report`: print results as coloured text, JSON or an HTML page

pub mod dispatch;
pub mod reconcile;
pub mod report;
