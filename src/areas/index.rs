//! Staging index
//!
//! The index lists the `(path, content-hash)` pairs captured by the next
//! commit. It is append-only between commits: staging a changed file adds a
//! second line for the same path, and readers treat the last line for a path
//! as authoritative. A successful commit clears it.
//!
//! ## Data Structures
//!
//! - `lines`: the distinct index lines in file order, duplicates by path allowed

use crate::artifacts::core::atomic_file;
use crate::artifacts::index::index_entry::IndexEntry;
use crate::errors::Result;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Staging index
#[derive(Debug, Clone)]
pub struct Index {
    /// Path to the index file (typically `.twig/index`)
    path: Box<Path>,
    /// Distinct index lines in the order they were appended
    lines: Vec<IndexEntry>,
    /// Flag indicating if the index has been modified since loading
    changed: bool,
}

impl Index {
    pub fn new(path: Box<Path>) -> Self {
        Index {
            path,
            lines: Vec::new(),
            changed: false,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_changed(&self) -> bool {
        self.changed
    }

    /// Load the index from disk
    ///
    /// A missing or empty file yields an empty index. Lines that cannot be
    /// parsed are skipped with a warning; exact duplicate lines collapse into
    /// their last occurrence.
    pub fn rehydrate(&mut self) -> Result<()> {
        self.lines.clear();
        self.changed = false;

        let Some(content) = atomic_file::read_locked(self.path())? else {
            return Ok(());
        };
        let content = String::from_utf8_lossy(&content);

        for (line_number, line) in content.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }

            match IndexEntry::parse_line(line) {
                Ok(entry) => {
                    self.lines.retain(|existing| existing != &entry);
                    self.lines.push(entry);
                }
                Err(e) => warn!(
                    index = %self.path.display(),
                    line = line_number + 1,
                    error = %e,
                    "skipping malformed index entry"
                ),
            }
        }

        debug!(lines = self.lines.len(), "loaded index");

        Ok(())
    }

    /// The effective entry for a path (its last line)
    pub fn entry_by_path(&self, path: &Path) -> Option<&IndexEntry> {
        self.lines.iter().rev().find(|entry| entry.name == path)
    }

    /// Append an entry unless it is already the effective entry for its path
    ///
    /// # Returns
    ///
    /// true when the entry was appended, false when it was already staged
    pub fn add(&mut self, entry: IndexEntry) -> bool {
        if self.entry_by_path(&entry.name) == Some(&entry) {
            return false;
        }

        // index lines stay distinct
        self.lines.retain(|existing| existing != &entry);
        self.lines.push(entry);
        self.changed = true;

        true
    }

    /// Entries with the last-entry-wins rule applied
    ///
    /// Each path appears once, carrying the hash of its last line, ordered by
    /// when that line was staged.
    pub fn entries(&self) -> Vec<IndexEntry> {
        let last_positions = self
            .lines
            .iter()
            .enumerate()
            .map(|(position, entry)| (&entry.name, position))
            .collect::<HashMap<&PathBuf, usize>>();

        self.lines
            .iter()
            .enumerate()
            .filter(|(position, entry)| last_positions.get(&entry.name) == Some(position))
            .map(|(_, entry)| entry.clone())
            .collect()
    }

    /// Raw index lines, including superseded ones
    pub fn lines(&self) -> &[IndexEntry] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Drop every entry
    pub fn clear(&mut self) {
        if !self.lines.is_empty() {
            self.lines.clear();
            self.changed = true;
        }
    }

    /// Persist the index atomically
    pub fn write_updates(&mut self) -> Result<()> {
        let content = self
            .lines
            .iter()
            .map(|entry| format!("{}\n", entry.to_line()))
            .collect::<String>();

        atomic_file::write_atomically(self.path(), content.as_bytes())?;
        self.changed = false;

        info!(lines = self.lines.len(), "wrote index");

        Ok(())
    }
}
