use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::diff::branch_diff::BranchComparison;
use crate::artifacts::log::rev_list::{CommitSummary, RevList};
use crate::errors::{Entity, Error, Result};
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Split the histories of two branches into shared and unique commits
    pub fn compare_branches(&self, first: &str, second: &str) -> Result<BranchComparison> {
        let first_history = self.branch_history(first)?;
        let second_history = self.branch_history(second)?;

        Ok(BranchComparison::compare(first_history, second_history))
    }

    /// Compare two branches and print the result as a table
    pub fn diff(&self, first: &str, second: &str) -> Result<BranchComparison> {
        let comparison = self.compare_branches(first, second)?;

        self.print_section("Common commits", &comparison.common, |text| text.normal())?;
        self.print_section(&format!("Only in {first}"), &comparison.only_in_first, |text| {
            text.green()
        })?;
        self.print_section(
            &format!("Only in {second}"),
            &comparison.only_in_second,
            |text| text.red(),
        )?;

        Ok(comparison)
    }

    fn branch_history(&self, branch_name: &str) -> Result<Vec<CommitSummary>> {
        let branch_name = BranchName::try_parse(branch_name.to_string())?;

        if !self.refs().branch_exists(&branch_name) {
            return Err(Error::not_found(Entity::Branch, &branch_name));
        }

        RevList::new(self.database(), self.refs().branch_hash(&branch_name)?).history()
    }

    fn print_section(
        &self,
        title: &str,
        summaries: &[CommitSummary],
        paint: impl Fn(&str) -> colored::ColoredString,
    ) -> Result<()> {
        writeln!(self.writer(), "{} ({})", title.bold(), summaries.len())?;

        for summary in summaries {
            writeln!(
                self.writer(),
                "  {}  {}  {}",
                paint(&summary.oid.to_short_oid()),
                summary.readable_timestamp(),
                summary.short_message()
            )?;
        }

        Ok(())
    }
}
