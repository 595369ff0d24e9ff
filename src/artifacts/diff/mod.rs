//! Branch comparison
//!
//! - `branch_diff`: splits two histories into shared commits and commits
//!   unique to either side
//!
//! Comparison works on commit identity only; file contents are never read.

pub mod branch_diff;
