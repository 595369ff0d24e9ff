//! Command implementations
//!
//! - `plumbing`: low-level access to stored objects
//! - `porcelain`: user-facing version control workflows

pub mod plumbing;
pub mod porcelain;
