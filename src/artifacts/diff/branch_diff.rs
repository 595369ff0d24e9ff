use crate::artifacts::log::rev_list::CommitSummary;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::HashSet;

/// Commit-identity comparison of two histories
///
/// Each list keeps the history order it was taken from: `common` and
/// `only_in_first` follow the first history, `only_in_second` the second.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchComparison {
    pub common: Vec<CommitSummary>,
    pub only_in_first: Vec<CommitSummary>,
    pub only_in_second: Vec<CommitSummary>,
}

impl BranchComparison {
    pub fn compare(first: Vec<CommitSummary>, second: Vec<CommitSummary>) -> Self {
        let first_ids = Self::ids(&first);
        let second_ids = Self::ids(&second);

        let (common, only_in_first): (Vec<_>, Vec<_>) = first
            .into_iter()
            .partition(|summary| second_ids.contains(&summary.oid));
        let only_in_second = second
            .into_iter()
            .filter(|summary| !first_ids.contains(&summary.oid))
            .collect();

        BranchComparison {
            common,
            only_in_first,
            only_in_second,
        }
    }

    pub fn is_identical(&self) -> bool {
        self.only_in_first.is_empty() && self.only_in_second.is_empty()
    }

    fn ids(history: &[CommitSummary]) -> HashSet<ObjectId> {
        history.iter().map(|summary| summary.oid.clone()).collect()
    }
}
