//! Data structures and algorithms
//!
//! - `branch`: branch name validation
//! - `core`: atomic file writes and locked reads
//! - `diff`: branch comparison by commit identity
//! - `ignore`: ignore-file glob rules
//! - `index`: index entry format
//! - `log`: commit history traversal
//! - `merge`: common ancestors and merge planning
//! - `objects`: object ids and commit records

pub mod branch;
pub mod core;
pub mod diff;
pub mod ignore;
pub mod index;
pub mod log;
pub mod merge;
pub mod objects;
