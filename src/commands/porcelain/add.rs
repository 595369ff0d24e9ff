use crate::areas::repository::Repository;
use crate::areas::workspace::Workspace;
use crate::artifacts::ignore::ignore_rules::IgnoreRules;
use crate::artifacts::index::index_entry::{IndexEntry, normalize_path};
use crate::errors::Result;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Matched by an ignore pattern or inside the repository directory
    Ignored,
    /// Already the effective index entry for the path
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageOutcome {
    Staged,
    Skipped(SkipReason),
}

/// Result of staging a single file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedPath {
    /// Path relative to the work tree root, `/`-separated
    pub path: PathBuf,
    pub outcome: StageOutcome,
}

impl StagedPath {
    fn new(path: &Path, outcome: StageOutcome) -> Self {
        StagedPath {
            path: PathBuf::from(normalize_path(path)),
            outcome,
        }
    }
}

impl Repository {
    /// Stage a file, or every non-ignored file under a directory
    ///
    /// `"."` stages the whole work tree. A missing path fails with `NotFound`
    /// and a path with a line break fails with `MalformedRecord`, both before
    /// the index file is touched. The index file is only rewritten when an
    /// entry was appended.
    pub async fn stage(&mut self, path: impl AsRef<Path>) -> Result<Vec<StagedPath>> {
        let relative_path = self.workspace().relative_path(path.as_ref())?;
        let ignore_rules = IgnoreRules::load(&self.path().join(&self.config().ignore_file))?;

        let index = self.index();
        let mut index = index.lock().await;

        // Load the index file from the disk
        index.rehydrate()?;

        let staged = if self.path().join(&relative_path).is_dir() {
            let dir = (relative_path != Path::new("")).then_some(relative_path.as_path());

            self.workspace()
                .list_files(dir)?
                .into_iter()
                .filter(|file| {
                    let ignored = ignore_rules.is_ignored(&normalize_path(file));
                    if ignored {
                        debug!(path = %file.display(), "ignored");
                    }
                    !ignored
                })
                .map(|file| self.stage_file(&mut index, &file))
                .collect::<Result<Vec<_>>>()?
        } else if Workspace::is_internal(&relative_path)
            || ignore_rules.is_ignored(&normalize_path(&relative_path))
        {
            vec![StagedPath::new(
                &relative_path,
                StageOutcome::Skipped(SkipReason::Ignored),
            )]
        } else {
            vec![self.stage_file(&mut index, &relative_path)?]
        };

        if index.is_changed() {
            index.write_updates()?;
        }

        for staged_path in &staged {
            match staged_path.outcome {
                StageOutcome::Staged => {
                    writeln!(self.writer(), "staged {}", staged_path.path.display())?
                }
                StageOutcome::Skipped(SkipReason::Ignored) => {
                    writeln!(self.writer(), "ignored {}", staged_path.path.display())?
                }
                StageOutcome::Skipped(SkipReason::Unchanged) => {
                    writeln!(self.writer(), "unchanged {}", staged_path.path.display())?
                }
            }
        }

        Ok(staged)
    }

    fn stage_file(
        &self,
        index: &mut crate::areas::index::Index,
        relative_path: &Path,
    ) -> Result<StagedPath> {
        let oid = self.workspace().hash_file(relative_path)?;
        let entry = IndexEntry::for_path(relative_path, oid)?;

        let outcome = if index.add(entry) {
            StageOutcome::Staged
        } else {
            StageOutcome::Skipped(SkipReason::Unchanged)
        };

        Ok(StagedPath::new(relative_path, outcome))
    }
}
