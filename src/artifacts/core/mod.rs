//! Core utilities shared by the repository areas
//!
//! - `atomic_file`: crash-safe writes (temp file + rename) and locked reads

pub mod atomic_file;
