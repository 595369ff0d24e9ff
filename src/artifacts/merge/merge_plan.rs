//! Merge plan
//!
//! Describes what each side of a merge changed since the common ancestor.
//!
//! Commits only record the files staged for them, so a side's changes are the
//! files of every commit reachable from its tip but not from the ancestor.
//! Those commits are replayed oldest first and the latest hash per path wins.
//! A path diverges when both sides end up with different hashes for it; the
//! same hash on both sides is not a conflict.

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::log::rev_list::{CommitSource, RevList};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Entity, Error, Result};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};

/// Effective file entries introduced on one side, in first-touched order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SideChanges {
    entries: Vec<IndexEntry>,
}

impl SideChanges {
    /// Collect the files changed between `base` (exclusive) and `tip` (inclusive)
    ///
    /// Without a base every commit reachable from `tip` counts.
    pub fn collect<S: CommitSource>(
        source: &S,
        tip: &ObjectId,
        base: Option<&ObjectId>,
    ) -> Result<Self> {
        let excluded = match base {
            Some(base) => RevList::new(source, Some(base.clone())).reachable()?,
            None => HashSet::new(),
        };

        let mut changes = SideChanges::default();
        let mut positions = HashMap::<PathBuf, usize>::new();

        let introduced = RevList::new(source, Some(tip.clone()))
            .history()?
            .into_iter()
            .rev()
            .filter(|summary| !excluded.contains(&summary.oid));

        for summary in introduced {
            let commit = source
                .load_commit(&summary.oid)?
                .ok_or_else(|| Error::not_found(Entity::Object, &summary.oid))?;

            for entry in commit.files() {
                match positions.get(&entry.name) {
                    Some(position) => changes.entries[*position] = entry.clone(),
                    None => {
                        positions.insert(entry.name.clone(), changes.entries.len());
                        changes.entries.push(entry.clone());
                    }
                }
            }
        }

        Ok(changes)
    }

    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.iter().find(|entry| entry.name == path)
    }
}

/// The two sides of a merge measured from their common ancestor
#[derive(Debug, Clone)]
pub struct MergePlan {
    base: Option<ObjectId>,
    ours: SideChanges,
    theirs: SideChanges,
}

impl MergePlan {
    pub fn build<S: CommitSource>(
        source: &S,
        current: &ObjectId,
        target: &ObjectId,
        base: Option<ObjectId>,
    ) -> Result<Self> {
        let ours = SideChanges::collect(source, current, base.as_ref())?;
        let theirs = SideChanges::collect(source, target, base.as_ref())?;

        Ok(MergePlan { base, ours, theirs })
    }

    pub fn base(&self) -> Option<&ObjectId> {
        self.base.as_ref()
    }

    pub fn ours(&self) -> &SideChanges {
        &self.ours
    }

    pub fn theirs(&self) -> &SideChanges {
        &self.theirs
    }

    /// Paths both sides changed to different contents, sorted
    pub fn conflicts(&self) -> Vec<PathBuf> {
        let mut conflicts = self
            .ours
            .entries()
            .iter()
            .filter(|ours| {
                self.theirs
                    .entry_by_path(&ours.name)
                    .is_some_and(|theirs| theirs.oid != ours.oid)
            })
            .map(|entry| entry.name.clone())
            .collect::<Vec<_>>();
        conflicts.sort();

        conflicts
    }

    /// Union of both sides: our entries, then their entries for other paths
    pub fn merged_files(&self) -> Vec<IndexEntry> {
        let mut files = self.ours.entries().to_vec();
        files.extend(
            self.theirs
                .entries()
                .iter()
                .filter(|theirs| self.ours.entry_by_path(&theirs.name).is_none())
                .cloned(),
        );

        files
    }
}
