//! twig: a minimal version-control engine
//!
//! Tracks `(path, content-hash)` pairs per commit in a content-addressed
//! object store under `.twig/`, with a staging index, branches, history
//! traversal, branch comparison and merges.
//!
//! - `areas`: the on-disk state owned by a [`areas::repository::Repository`]
//! - `artifacts`: data structures and graph algorithms
//! - `commands`: porcelain and plumbing operations on a repository
//! - `errors`: the error taxonomy shared by every operation
//!
//! The library only emits `tracing` events; installing a subscriber is left
//! to the binary.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use errors::{Error, Result};
