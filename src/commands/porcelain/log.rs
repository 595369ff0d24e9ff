use crate::areas::repository::Repository;
use crate::artifacts::log::rev_list::{CommitSummary, RevList};
use crate::errors::Result;
use colored::Colorize;
use std::io::Write;

#[derive(Debug, Clone, Default)]
pub struct LogOptions {
    pub oneline: bool,
}

impl Repository {
    /// History of the current branch, most recent first
    pub fn history(&self) -> Result<Vec<CommitSummary>> {
        RevList::new(self.database(), self.refs().current_commit()?).history()
    }

    pub fn log(&self, opts: &LogOptions) -> Result<()> {
        let (branch, _) = self.refs().current_branch()?;

        for (position, summary) in self.history()?.iter().enumerate() {
            let decoration = if position == 0 {
                format!(" ({})", format!("HEAD -> {branch}").as_str().cyan())
            } else {
                String::new()
            };

            if opts.oneline {
                self.show_commit_oneline(summary, &decoration)?;
            } else {
                if position > 0 {
                    writeln!(self.writer())?;
                }
                self.show_commit_medium(summary, &decoration)?;
            }
        }

        Ok(())
    }

    fn show_commit_medium(&self, summary: &CommitSummary, decoration: &str) -> Result<()> {
        writeln!(
            self.writer(),
            "{}{}",
            format!("commit {}", summary.oid).as_str().yellow(),
            decoration
        )?;
        if summary.parents.len() > 1 {
            let parents = summary
                .parents
                .iter()
                .map(|parent| parent.to_short_oid())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(self.writer(), "Merge: {parents}")?;
        }
        writeln!(self.writer(), "Author: {}", summary.author)?;
        writeln!(self.writer(), "Date:   {}", summary.readable_timestamp())?;
        writeln!(self.writer())?;
        for message_line in summary.message.lines() {
            writeln!(self.writer(), "    {}", message_line)?;
        }

        Ok(())
    }

    fn show_commit_oneline(&self, summary: &CommitSummary, decoration: &str) -> Result<()> {
        writeln!(
            self.writer(),
            "{}{} {}",
            summary.oid.to_short_oid().as_str().yellow(),
            decoration,
            summary.short_message()
        )?;

        Ok(())
    }
}
