use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::{Author, Commit, load_timestamp_from_env};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use std::io::Write;
use tracing::info;

impl Repository {
    /// Record the staged entries as a new commit on the current branch
    ///
    /// Fails with `EmptyStaging` when nothing is staged, leaving the object
    /// store and refs untouched. On success the index is cleared. The message
    /// is stored exactly as given.
    pub async fn commit(&mut self, message: &str) -> Result<ObjectId> {
        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let files = index.entries();
        if files.is_empty() {
            return Err(Error::EmptyStaging);
        }

        let (branch, parent) = self.refs().current_branch()?;
        let is_root = match parent {
            Some(_) => "",
            None => "(root-commit) ",
        };

        let author = Author::load(self.config().author.as_deref())?;
        let commit = Commit::new(
            parent.into_iter().collect(),
            author,
            load_timestamp_from_env(),
            files,
            message.to_string(),
        );
        let commit_id = self.database().store(&commit)?;
        self.refs().update_head(&commit_id)?;

        index.clear();
        index.write_updates()?;
        info!(oid = %commit_id, "cleared index after commit");

        writeln!(
            self.writer(),
            "[{} {}{}] {}",
            branch,
            is_root,
            commit_id.to_short_oid(),
            commit.short_message()
        )?;

        Ok(commit_id)
    }
}
