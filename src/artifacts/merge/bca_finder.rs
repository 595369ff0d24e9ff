//! Common ancestor finder for merge operations
//!
//! Finds the best common ancestor of two commits: the base from which each
//! side's changes are measured.
//!
//! ## Algorithm Overview
//!
//! 1. Collect the set of commits reachable from the target
//! 2. Walk the current commit's history in topological order (every commit
//!    before its ancestors)
//! 3. The first commit of that walk which is also in the target set is the
//!    best common ancestor
//!
//! > A best common ancestor of commits X and Y is any common ancestor of X and Y
//! > that is not an ancestor of any other common ancestor.
//!
//! The topological order guarantees the invariant: a common ancestor that
//! descends from the chosen one would have been reached first.

use crate::artifacts::log::rev_list::{CommitSource, RevList};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use derive_new::new;
use tracing::debug;

/// Finds common ancestors between commits
#[derive(Debug, new)]
pub struct BCAFinder<'s, S: CommitSource> {
    source: &'s S,
}

impl<S: CommitSource> BCAFinder<'_, S> {
    /// Best common ancestor of `current` and `target`
    ///
    /// `None` when the histories share no commit.
    pub fn find_best_common_ancestor(
        &self,
        current: &ObjectId,
        target: &ObjectId,
    ) -> Result<Option<ObjectId>> {
        let target_history = RevList::new(self.source, Some(target.clone())).reachable()?;

        let ancestor = RevList::new(self.source, Some(current.clone()))
            .history()?
            .into_iter()
            .map(|summary| summary.oid)
            .find(|oid| target_history.contains(oid));

        debug!(current = %current, target = %target, ancestor = ?ancestor, "found best common ancestor");

        Ok(ancestor)
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::log::rev_list::tests::MemoryGraph;
    use pretty_assertions::assert_eq;

    #[test]
    fn linear_history_ancestor_is_older_commit() {
        let graph = MemoryGraph::default();
        let a = graph.add("A", &[]);
        let b = graph.add("B", &["A"]);
        let c = graph.add("C", &["B"]);

        let finder = BCAFinder::new(&graph);

        assert_eq!(finder.find_best_common_ancestor(&c, &a).unwrap(), Some(a.clone()));
        assert_eq!(finder.find_best_common_ancestor(&a, &c).unwrap(), Some(a));
        assert_eq!(finder.find_best_common_ancestor(&c, &b).unwrap(), Some(b));
    }

    #[test]
    fn forked_branches_meet_at_fork_point() {
        //   A - B - C   (main)
        //        \
        //         D - E (feature)
        let graph = MemoryGraph::default();
        graph.add("A", &[]);
        let b = graph.add("B", &["A"]);
        let c = graph.add("C", &["B"]);
        graph.add("D", &["B"]);
        let e = graph.add("E", &["D"]);

        let finder = BCAFinder::new(&graph);

        assert_eq!(finder.find_best_common_ancestor(&c, &e).unwrap(), Some(b));
    }

    #[test]
    fn previous_merge_moves_the_base_forward() {
        //   A - B ----- M - F   (main)
        //    \         /
        //     C ----- D - G     (feature)
        let graph = MemoryGraph::default();
        graph.add("A", &[]);
        graph.add("B", &["A"]);
        graph.add("C", &["A"]);
        let d = graph.add("D", &["C"]);
        graph.add("M", &["B", "D"]);
        let f = graph.add("F", &["M"]);
        let g = graph.add("G", &["D"]);

        let finder = BCAFinder::new(&graph);

        assert_eq!(finder.find_best_common_ancestor(&f, &g).unwrap(), Some(d));
    }

    #[test]
    fn unrelated_histories_have_no_ancestor() {
        let graph = MemoryGraph::default();
        let a = graph.add("A", &[]);
        let x = graph.add("X", &[]);

        let finder = BCAFinder::new(&graph);

        assert_eq!(finder.find_best_common_ancestor(&a, &x).unwrap(), None);
    }
}
