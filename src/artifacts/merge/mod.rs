//! Merge algorithms
//!
//! - `bca_finder`: best common ancestor and ancestry checks over the commit graph
//! - `merge_plan`: per-side file changes since the ancestor and divergence detection

pub mod bca_finder;
pub mod merge_plan;
