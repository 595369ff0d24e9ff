//! Plumbing commands
//!
//! - `cat-file`: print a stored commit record

pub mod cat_file;
