//! On-disk areas of a repository
//!
//! - `config`: JSON repository settings
//! - `database`: object store for commit records
//! - `index`: staging area of `(path, content-hash)` entries
//! - `refs`: HEAD and branch references
//! - `repository`: ties the areas together around an injected writer
//! - `workspace`: work tree listing and content hashing

pub mod config;
pub mod database;
pub mod index;
pub mod refs;
pub mod repository;
pub mod workspace;
