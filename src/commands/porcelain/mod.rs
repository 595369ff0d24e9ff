//! Porcelain commands
//!
//! User-facing operations implemented on [`Repository`](crate::areas::repository::Repository):
//!
//! - `init`: create the repository directory
//! - `add`: stage files
//! - `commit`: record staged files
//! - `log`: show history
//! - `branch`: create or list branches
//! - `switch`: check out another branch
//! - `merge`: combine another branch into the current one
//! - `diff`: compare the histories of two branches

pub mod add;
pub mod branch;
pub mod commit;
pub mod diff;
pub mod init;
pub mod log;
pub mod merge;
pub mod switch;
