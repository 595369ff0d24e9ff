//! Commit history traversal
//!
//! - `rev_list`: depth-first walk over parent links producing commit
//!   summaries, most recent first
//!
//! The walk reads only from a [`rev_list::CommitSource`], so the same code
//! serves the on-disk object store and in-memory graphs in tests.

pub mod rev_list;
