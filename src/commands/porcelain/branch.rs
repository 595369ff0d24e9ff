use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Create a branch at the current commit
    pub fn create_branch(&mut self, branch_name: &str) -> Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let oid = self.refs().create_branch(&branch_name)?;

        writeln!(
            self.writer(),
            "Created branch '{}' at {}",
            branch_name,
            oid.to_short_oid()
        )?;

        Ok(oid)
    }

    /// List branches, marking the checked-out one with `*`
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let (current, _) = self.refs().current_branch()?;
        let branches = self.refs().list_branches()?;

        for branch in &branches {
            if *branch == current {
                writeln!(self.writer(), "* {}", branch.as_ref().green())?;
            } else {
                writeln!(self.writer(), "  {}", branch)?;
            }
        }

        Ok(branches)
    }
}
