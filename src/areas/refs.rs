//! References (HEAD and branches)
//!
//! References are human-readable names pointing to commits.
//!
//! ## Reference Types
//!
//! - HEAD: symbolic reference naming the checked-out branch, followed by a
//!   cached copy of that branch's commit hash
//! - Branches: refs/heads/* holding a single commit hash
//!
//! ## File Format
//!
//! ```text
//! HEAD:               ref: refs/heads/<branch>
//!                     <commit-hash>            (absent before the first commit)
//! refs/heads/<name>:  <commit-hash>
//! ```
//!
//! The branch file is authoritative; the hash cached in HEAD is rewritten
//! every time the branch moves or HEAD switches.

use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::core::atomic_file;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Entity, Error, Result};
use derive_new::new;
use std::path::Path;
use tracing::{info, warn};
use walkdir::WalkDir;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Parsed contents of the HEAD file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadState {
    /// Branch HEAD symbolically points at
    pub branch: BranchName,
    /// Commit hash cached on HEAD's second line
    pub cached_oid: Option<ObjectId>,
}

impl HeadState {
    fn parse(content: &str) -> Result<Self> {
        let mut lines = content.lines().map(str::trim).filter(|line| !line.is_empty());

        let symref = lines
            .next()
            .ok_or_else(|| Error::malformed(HEAD_REF_NAME, "file is empty"))?;
        let Some(captures) = regex::Regex::new(SYMREF_REGEX)
            .map_err(|e| Error::malformed("symbolic ref regex", e))?
            .captures(symref)
        else {
            // a bare commit hash means HEAD was detached by another tool
            if ObjectId::try_parse(symref.to_string()).is_ok() {
                return Err(Error::DetachedHead);
            }
            return Err(Error::malformed(
                HEAD_REF_NAME,
                format!("expected 'ref: <path>', got '{symref}'"),
            ));
        };
        let branch = BranchName::try_parse_ref_path(&captures[1])?;

        let cached_oid = lines
            .next()
            .map(|oid| ObjectId::try_parse(oid.to_string()))
            .transpose()?;

        Ok(HeadState { branch, cached_oid })
    }

    fn render(&self) -> String {
        match &self.cached_oid {
            Some(oid) => format!("ref: {}\n{}\n", self.branch.to_ref_path(), oid),
            None => format!("ref: {}\n", self.branch.to_ref_path()),
        }
    }
}

/// References manager
///
/// Reads and writes HEAD and branch refs. Every write replaces the file
/// atomically.
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the repository directory (typically `.twig`)
    path: Box<Path>,
}

impl Refs {
    pub fn head_path(&self) -> Box<Path> {
        self.path.join(HEAD_REF_NAME).into_boxed_path()
    }

    pub fn refs_path(&self) -> Box<Path> {
        self.path.join("refs").into_boxed_path()
    }

    pub fn heads_path(&self) -> Box<Path> {
        self.refs_path().join("heads").into_boxed_path()
    }

    fn branch_path(&self, name: &BranchName) -> Box<Path> {
        self.heads_path().join(name.as_ref()).into_boxed_path()
    }

    /// Read and parse the HEAD file
    ///
    /// Fails with `NotFound` when HEAD is missing and `MalformedRecord` when
    /// it is not a symbolic ref.
    pub fn read_head_state(&self) -> Result<HeadState> {
        let content = atomic_file::read_locked(&self.head_path())?
            .ok_or_else(|| Error::not_found(Entity::Head, HEAD_REF_NAME))?;

        HeadState::parse(&String::from_utf8_lossy(&content))
    }

    /// The checked-out branch and the commit it points to
    ///
    /// The commit is `None` while the branch has no commits.
    pub fn current_branch(&self) -> Result<(BranchName, Option<ObjectId>)> {
        let head = self.read_head_state()?;
        let oid = self.branch_hash(&head.branch)?;

        if oid != head.cached_oid {
            warn!(
                branch = %head.branch,
                cached = ?head.cached_oid,
                actual = ?oid,
                "HEAD cache disagrees with branch ref"
            );
        }

        Ok((head.branch, oid))
    }

    /// The commit HEAD resolves to, if any
    pub fn current_commit(&self) -> Result<Option<ObjectId>> {
        Ok(self.current_branch()?.1)
    }

    /// The commit a branch points to
    ///
    /// `None` when the branch does not exist or has no commit yet.
    pub fn branch_hash(&self, name: &BranchName) -> Result<Option<ObjectId>> {
        let branch_path = self.branch_path(name);
        // a directory here holds branches nested under this name
        if !branch_path.is_file() {
            return Ok(None);
        }

        let Some(content) = atomic_file::read_locked(&branch_path)? else {
            return Ok(None);
        };
        let content = String::from_utf8_lossy(&content);
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        ObjectId::try_parse(content.to_string())
            .map(Some)
            .map_err(|e| Error::malformed(format!("branch '{name}'"), e))
    }

    pub fn branch_exists(&self, name: &BranchName) -> bool {
        self.branch_path(name).is_file()
    }

    /// Create a branch pointing at the current commit
    pub fn create_branch(&self, name: &BranchName) -> Result<ObjectId> {
        if let Some(existing) = self.colliding_ref(name) {
            return Err(Error::already_exists(Entity::Branch, existing));
        }

        let oid = self.current_commit()?.ok_or(Error::NoCommits)?;
        self.write_branch(name, &oid)?;

        info!(branch = %name, oid = %oid, "created branch");

        Ok(oid)
    }

    /// The existing ref path that would block creating `name`
    ///
    /// Either the branch itself, a branch nested under it (`name/...`), or a
    /// branch whose name is a prefix directory of it.
    fn colliding_ref(&self, name: &BranchName) -> Option<String> {
        let heads_path = self.heads_path();
        let branch_path = self.branch_path(name);

        if branch_path.exists() {
            return Some(name.to_string());
        }

        branch_path
            .ancestors()
            .skip(1)
            .take_while(|ancestor| *ancestor != &*heads_path)
            .find(|ancestor| ancestor.is_file())
            .and_then(|ancestor| ancestor.strip_prefix(&heads_path).ok())
            .map(|relative| {
                relative
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/")
            })
    }

    /// Point HEAD at an existing branch
    pub fn switch_branch(&self, name: &BranchName) -> Result<ObjectId> {
        let oid = self
            .branch_hash(name)?
            .ok_or_else(|| Error::not_found(Entity::Branch, name))?;

        self.write_head(&HeadState {
            branch: name.clone(),
            cached_oid: Some(oid.clone()),
        })?;

        info!(branch = %name, oid = %oid, "switched branch");

        Ok(oid)
    }

    /// Move the checked-out branch to a new commit and refresh HEAD
    ///
    /// When HEAD cannot be rewritten the branch ref is restored, so either
    /// both files move or neither does.
    pub fn update_head(&self, oid: &ObjectId) -> Result<()> {
        let head = self.read_head_state()?;
        let previous = self.branch_hash(&head.branch)?;

        self.write_branch(&head.branch, oid)?;

        let head_written = self.write_head(&HeadState {
            branch: head.branch.clone(),
            cached_oid: Some(oid.clone()),
        });

        if let Err(e) = head_written {
            let restored = match &previous {
                Some(previous) => self.write_branch(&head.branch, previous),
                None => std::fs::remove_file(self.branch_path(&head.branch)).map_err(Error::from),
            };
            if let Err(restore_error) = restored {
                warn!(branch = %head.branch, error = %restore_error, "unable to restore branch ref");
            }
            return Err(e);
        }

        info!(branch = %head.branch, oid = %oid, "moved branch");

        Ok(())
    }

    /// Point HEAD symbolically at a branch, refreshing the cached hash
    pub fn set_head(&self, name: &BranchName) -> Result<()> {
        let cached_oid = self.branch_hash(name)?;

        self.write_head(&HeadState {
            branch: name.clone(),
            cached_oid,
        })
    }

    /// All branch names, sorted
    pub fn list_branches(&self) -> Result<Vec<BranchName>> {
        let heads_path = self.heads_path();

        let mut branches = WalkDir::new(&heads_path)
            .into_iter()
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.path().is_file())
            .filter_map(|entry| {
                let relative_path = entry.path().strip_prefix(&heads_path).ok()?;
                let name = relative_path
                    .components()
                    .map(|component| component.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                BranchName::try_parse(name).ok()
            })
            .collect::<Vec<_>>();
        branches.sort();

        Ok(branches)
    }

    fn write_branch(&self, name: &BranchName, oid: &ObjectId) -> Result<()> {
        atomic_file::write_atomically(&self.branch_path(name), format!("{oid}\n").as_bytes())
    }

    fn write_head(&self, head: &HeadState) -> Result<()> {
        atomic_file::write_atomically(&self.head_path(), head.render().as_bytes())
    }
}
