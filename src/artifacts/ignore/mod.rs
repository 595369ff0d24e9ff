//! Ignore file support
//!
//! - `ignore_rules`: glob patterns loaded from the ignore file

pub mod ignore_rules;

/// Default name of the ignore file at the work tree root
pub const DEFAULT_IGNORE_FILE: &str = ".twigignore";
