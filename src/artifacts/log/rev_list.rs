//! Revision list
//!
//! Walks the commit graph from a start commit through every parent link.
//!
//! ## Algorithm
//!
//! An iterative depth-first search marks each commit `InProgress` while its
//! ancestors are being explored and `Done` afterwards:
//!
//! - reaching a `Done` commit again is a legitimate revisit (two paths to the
//!   same ancestor, e.g. after a merge) and is skipped
//! - reaching an `InProgress` commit means it is its own ancestor, which is
//!   reported as `CorruptHistory`
//! - a missing object ends that line of the walk without error
//!
//! Parents are explored last-to-first, so the reverse postorder lists the
//! start commit first, then its first-parent line, then commits reachable only
//! through later parents. Every commit appears before all of its ancestors.

use crate::artifacts::objects::commit::{Commit, readable_timestamp};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Read access to commit records
pub trait CommitSource {
    /// Load a commit, `None` when no object exists for `oid`
    fn load_commit(&self, oid: &ObjectId) -> Result<Option<Commit>>;
}

impl<S: CommitSource + ?Sized> CommitSource for &S {
    fn load_commit(&self, oid: &ObjectId) -> Result<Option<Commit>> {
        (**self).load_commit(oid)
    }
}

/// The fields of a commit needed to present history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitSummary {
    pub oid: ObjectId,
    pub message: String,
    pub timestamp: i64,
    pub author: String,
    pub parents: Vec<ObjectId>,
}

impl CommitSummary {
    pub fn from_commit(oid: ObjectId, commit: &Commit) -> Self {
        CommitSummary {
            oid,
            message: commit.message().to_string(),
            timestamp: commit.timestamp(),
            author: commit.author().display_name(),
            parents: commit.parents().to_vec(),
        }
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn short_message(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    pub fn readable_timestamp(&self) -> String {
        readable_timestamp(self.timestamp)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    InProgress,
    Done,
}

enum Step {
    Enter(ObjectId),
    Leave(ObjectId),
}

/// History walk starting at a single commit
#[derive(Debug, new)]
pub struct RevList<'s, S: CommitSource> {
    source: &'s S,
    start: Option<ObjectId>,
}

impl<S: CommitSource> RevList<'_, S> {
    /// Summaries of every commit reachable from the start, most recent first
    ///
    /// The first element is the start commit; the result is empty when there
    /// is no start commit or its object is missing.
    pub fn history(&self) -> Result<Vec<CommitSummary>> {
        let Some(start) = &self.start else {
            return Ok(Vec::new());
        };

        let mut marks = HashMap::<ObjectId, Mark>::new();
        let mut missing = HashSet::<ObjectId>::new();
        let mut summaries = HashMap::<ObjectId, CommitSummary>::new();
        let mut postorder = Vec::new();
        let mut steps = vec![Step::Enter(start.clone())];

        while let Some(step) = steps.pop() {
            match step {
                Step::Enter(oid) => {
                    match marks.get(&oid) {
                        Some(Mark::InProgress) => return Err(Error::CorruptHistory(oid)),
                        Some(Mark::Done) => continue,
                        None if missing.contains(&oid) => continue,
                        None => {}
                    }

                    let Some(commit) = self.source.load_commit(&oid)? else {
                        debug!(oid = %oid, "history stops at missing object");
                        missing.insert(oid);
                        continue;
                    };

                    marks.insert(oid.clone(), Mark::InProgress);
                    steps.push(Step::Leave(oid.clone()));
                    for parent in commit.parents() {
                        steps.push(Step::Enter(parent.clone()));
                    }
                    summaries.insert(oid.clone(), CommitSummary::from_commit(oid, &commit));
                }
                Step::Leave(oid) => {
                    marks.insert(oid.clone(), Mark::Done);
                    postorder.push(oid);
                }
            }
        }

        debug!(start = %start, commits = postorder.len(), "walked history");

        Ok(postorder
            .into_iter()
            .rev()
            .filter_map(|oid| summaries.remove(&oid))
            .collect())
    }

    /// Hashes of every commit reachable from the start
    pub fn reachable(&self) -> Result<HashSet<ObjectId>> {
        Ok(self
            .history()?
            .into_iter()
            .map(|summary| summary.oid)
            .collect())
    }
}
