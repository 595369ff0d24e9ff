//! Ignore rules
//!
//! One glob pattern per line; blank lines and lines starting with `#` are
//! skipped. A path is ignored when the pattern matches the whole relative
//! path, its file name, or any of its parent directories.

use crate::errors::{Error, Result};
use glob::Pattern;
use std::path::Path;

#[derive(Debug, Clone, Default)]
pub struct IgnoreRules {
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    /// Parse the contents of an ignore file
    pub fn parse(content: &str) -> Result<Self> {
        let patterns = content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(|line| {
                let line = line.trim_start_matches("./").trim_end_matches('/');
                Pattern::new(line).map_err(|e| Error::InvalidPattern {
                    pattern: line.to_string(),
                    reason: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(IgnoreRules { patterns })
    }

    /// Load the ignore file, treating a missing file as "no rules"
    pub fn load(path: &Path) -> Result<Self> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::parse(&content),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Check a `/`-separated path relative to the work tree root
    pub fn is_ignored(&self, relative_path: &str) -> bool {
        if self.patterns.is_empty() {
            return false;
        }

        let components = relative_path.split('/').collect::<Vec<_>>();

        (1..=components.len()).any(|depth| {
            let prefix = components[..depth].join("/");
            let name = components[depth - 1];

            self.patterns
                .iter()
                .any(|pattern| pattern.matches(&prefix) || pattern.matches(name))
        })
    }
}
