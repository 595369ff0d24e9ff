use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::merge::bca_finder::BCAFinder;
use crate::artifacts::merge::merge_plan::MergePlan;
use crate::artifacts::objects::commit::{Author, Commit, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Entity, Error, Result};
use std::io::Write;
use tracing::info;

/// How a merge resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MergeOutcome {
    /// The target is the checked-out branch
    NoOp,
    /// The target tip is already part of the current history
    AlreadyUpToDate,
    /// The current branch moved forward to the target tip
    FastForward(ObjectId),
    /// A merge commit with both tips as parents was created
    Merged(ObjectId),
}

impl Repository {
    /// Merge another branch into the current one
    ///
    /// Fails with `NotFound` when the target has no commit and with `Conflict`
    /// when both sides changed a path differently; neither case changes any
    /// ref or object.
    pub async fn merge(&mut self, target: &str, message: Option<&str>) -> Result<MergeOutcome> {
        let target_branch = BranchName::try_parse(target.to_string())?;
        let (current_branch, head_oid) = self.refs().current_branch()?;

        let merge_oid = self
            .refs()
            .branch_hash(&target_branch)?
            .ok_or_else(|| Error::not_found(Entity::Branch, &target_branch))?;

        // merges never run alongside staging or committing
        let index = self.index();
        let _index = index.lock().await;

        if target_branch == current_branch {
            writeln!(self.writer(), "Already on '{}'; nothing to merge", target_branch)?;
            return Ok(MergeOutcome::NoOp);
        }

        let Some(head_oid) = head_oid else {
            return self.fast_forward(&merge_oid);
        };

        let database = self.database();
        let base_oid = BCAFinder::new(database).find_best_common_ancestor(&head_oid, &merge_oid)?;

        if base_oid.as_ref() == Some(&merge_oid) {
            writeln!(self.writer(), "Already up to date.")?;
            return Ok(MergeOutcome::AlreadyUpToDate);
        }
        if base_oid.as_ref() == Some(&head_oid) {
            return self.fast_forward(&merge_oid);
        }

        let plan = MergePlan::build(database, &head_oid, &merge_oid, base_oid)?;
        let conflicts = plan.conflicts();
        if !conflicts.is_empty() {
            return Err(Error::Conflict(conflicts));
        }

        let message = match message {
            Some(message) => message.to_string(),
            None => format!("Merge branch '{}' into {}", target_branch, current_branch),
        };
        let commit = Commit::new(
            vec![head_oid, merge_oid],
            Author::load(self.config().author.as_deref())?,
            load_timestamp_from_env(),
            plan.merged_files(),
            message,
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        info!(
            base = ?plan.base(),
            files = commit.files().len(),
            oid = %commit_id,
            "created merge commit"
        );
        writeln!(
            self.writer(),
            "Merge made by the union strategy: [{}] {}",
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(MergeOutcome::Merged(commit_id))
    }

    fn fast_forward(&self, merge_oid: &ObjectId) -> Result<MergeOutcome> {
        let (_, head_oid) = self.refs().current_branch()?;

        self.refs().update_head(merge_oid)?;

        match head_oid {
            Some(head_oid) => writeln!(
                self.writer(),
                "Updating {}..{}\nFast-forward",
                head_oid.to_short_oid(),
                merge_oid.to_short_oid()
            )?,
            None => writeln!(self.writer(), "Fast-forward to {}", merge_oid.to_short_oid())?,
        }

        Ok(MergeOutcome::FastForward(merge_oid.clone()))
    }
}
