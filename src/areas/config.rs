//! Repository configuration
//!
//! Stored as pretty-printed JSON in `.twig/config`. A missing file loads as
//! the defaults so repositories created without one keep working.

use crate::artifacts::branch::DEFAULT_BRANCH;
use crate::artifacts::core::atomic_file;
use crate::artifacts::ignore::DEFAULT_IGNORE_FILE;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const CONFIG_FILE: &str = "config";
const REPOSITORY_KIND: &str = "twig";
const FORMAT_VERSION: &str = "1.0";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub repository: String,
    pub version: String,
    pub default_branch: String,
    pub ignore_file: String,
    /// Fallback author identity, `Name <email>`
    pub author: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            repository: REPOSITORY_KIND.to_string(),
            version: FORMAT_VERSION.to_string(),
            default_branch: DEFAULT_BRANCH.to_string(),
            ignore_file: DEFAULT_IGNORE_FILE.to_string(),
            author: None,
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> crate::errors::Result<Self> {
        match atomic_file::read_locked(path)? {
            Some(content) => Ok(serde_json::from_slice(&content)?),
            None => Ok(Config::default()),
        }
    }

    pub fn store(&self, path: &Path) -> crate::errors::Result<()> {
        let mut content = serde_json::to_vec_pretty(self)?;
        content.push(b'\n');

        atomic_file::write_atomically(path, &content)
    }
}
