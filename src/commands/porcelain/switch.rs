use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::Result;
use std::io::Write;

impl Repository {
    /// Point HEAD at another existing branch
    ///
    /// Only references move; the work tree and index are left as they are.
    pub fn switch_branch(&mut self, branch_name: &str) -> Result<ObjectId> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        let oid = self.refs().switch_branch(&branch_name)?;

        writeln!(self.writer(), "Switched to branch '{}'", branch_name)?;

        Ok(oid)
    }
}
