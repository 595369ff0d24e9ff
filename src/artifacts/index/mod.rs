//! Staging index file format
//!
//! The index (staging area) lists the files captured by the next commit. It
//! is a plain text file with one entry per line:
//!
//! ```text
//! <path> <content-hash>
//! ```
//!
//! Paths are relative to the work tree and use `/` separators. The hash is
//! split from the right, so paths may contain spaces. Lines are appended as
//! files are staged; when a path appears more than once, the last line wins.

pub mod index_entry;

/// Separator between the path and the hash on an index line
pub const FIELD_SEPARATOR: char = ' ';
