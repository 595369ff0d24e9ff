//! Error taxonomy for repository operations
//!
//! Every core operation returns [`Result`], so callers can tell which condition
//! occurred instead of only learning that something failed:
//!
//! - `NotFound`: a missing path, branch, object or HEAD
//! - `AlreadyExists`: a branch or repository name collision
//! - `EmptyStaging`: commit attempted with nothing staged
//! - `MalformedRecord`: an unparseable index line or commit object
//! - `CorruptHistory`: a cycle in the parent chain
//! - `Conflict`: a path diverged on both sides of a merge
//! - `Io`: any underlying filesystem failure

use crate::artifacts::objects::object_id::ObjectId;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Kind of entity an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    Path,
    Branch,
    Object,
    Head,
    Repository,
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Entity::Path => "path",
            Entity::Branch => "branch",
            Entity::Object => "object",
            Entity::Head => "HEAD",
            Entity::Repository => "repository",
        };
        write!(f, "{name}")
    }
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("not a twig repository (or any parent): {0}")]
    NotARepository(PathBuf),

    #[error("{what} '{name}' not found")]
    NotFound { what: Entity, name: String },

    #[error("{what} '{name}' already exists")]
    AlreadyExists { what: Entity, name: String },

    #[error("nothing staged for commit")]
    EmptyStaging,

    #[error("no commits yet: HEAD does not point to a commit")]
    NoCommits,

    #[error("invalid branch name: '{0}'")]
    InvalidBranchName(String),

    #[error("HEAD is not attached to a branch")]
    DetachedHead,

    #[error("malformed {what}: {reason}")]
    MalformedRecord { what: String, reason: String },

    #[error("corrupt history: commit {0} is its own ancestor")]
    CorruptHistory(ObjectId),

    #[error("merge conflict in: {}", display_paths(.0))]
    Conflict(Vec<PathBuf>),

    #[error("author identity unknown: set TWIG_AUTHOR_NAME or the `author` config key")]
    MissingAuthor,

    #[error("invalid ignore pattern '{pattern}': {reason}")]
    InvalidPattern { pattern: String, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unable to walk work tree: {0}")]
    Walk(#[from] walkdir::Error),
}

impl Error {
    pub fn not_found(what: Entity, name: impl fmt::Display) -> Self {
        Error::NotFound {
            what,
            name: name.to_string(),
        }
    }

    pub fn already_exists(what: Entity, name: impl fmt::Display) -> Self {
        Error::AlreadyExists {
            what,
            name: name.to_string(),
        }
    }

    pub fn malformed(what: impl fmt::Display, reason: impl fmt::Display) -> Self {
        Error::MalformedRecord {
            what: what.to_string(),
            reason: reason.to_string(),
        }
    }
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

pub type Result<T> = std::result::Result<T, Error>;
