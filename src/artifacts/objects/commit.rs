//! Commit object
//!
//! A commit records which file contents were staged at a point in time.
//! It contains:
//! - Parent commit ID(s): none for the root commit, two for a merge commit
//! - The author
//! - A creation timestamp in seconds since the epoch
//! - The staged `(path, content-hash)` pairs in staging order
//! - The commit message
//!
//! ## Format
//!
//! On disk (before compression):
//! ```text
//! commit <size>\0
//! parent <parent-sha>
//! author <name> <email>
//! timestamp <seconds>
//! file <content-sha> <path>
//!
//! <commit message>
//! ```

use crate::artifacts::index::index_entry::IndexEntry;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use bytes::Bytes;
use std::io::{BufRead, Write};
use std::path::PathBuf;

pub const COMMIT_TYPE: &str = "commit";

const AUTHOR_NAME_VAR: &str = "TWIG_AUTHOR_NAME";
const AUTHOR_EMAIL_VAR: &str = "TWIG_AUTHOR_EMAIL";
const AUTHOR_DATE_VAR: &str = "TWIG_AUTHOR_DATE";

/// Author information
///
/// Rendered as `Name <email>`, or just `Name` when no email is known.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Author {
    name: String,
    email: Option<String>,
}

impl Author {
    pub fn new(name: String, email: Option<String>) -> Self {
        Author { name, email }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        match &self.email {
            Some(email) => format!("{} <{}>", self.name, email),
            None => self.name.clone(),
        }
    }

    /// Resolve the author identity
    ///
    /// Reads TWIG_AUTHOR_NAME and TWIG_AUTHOR_EMAIL first and falls back to the
    /// `author` key of the repository config. Identities that could not be read
    /// back from a commit are rejected here, before anything is stored.
    pub fn load(config_author: Option<&str>) -> Result<Self> {
        match std::env::var(AUTHOR_NAME_VAR) {
            Ok(name) if !name.trim().is_empty() => {
                let email = std::env::var(AUTHOR_EMAIL_VAR)
                    .ok()
                    .map(|email| email.trim().to_string())
                    .filter(|email| !email.is_empty());
                Author::new(name.trim().to_string(), email).validated()
            }
            _ => config_author
                .filter(|author| !author.trim().is_empty())
                .map(Author::try_from)
                .unwrap_or(Err(Error::MissingAuthor)),
        }
    }

    /// Check that `display_name` parses back into the same author
    pub fn validated(self) -> Result<Self> {
        let reserved = |text: &str| text.contains(['<', '>', '\n', '\r']);

        if self.name.trim().is_empty() || self.name.trim() != self.name {
            return Err(Error::malformed(
                "author",
                format!("invalid name '{}'", self.name),
            ));
        }
        if reserved(&self.name) || self.email.as_deref().is_some_and(reserved) {
            return Err(Error::malformed(
                "author",
                format!(
                    "'{}' may not contain '<', '>' or line breaks",
                    self.display_name().escape_debug()
                ),
            ));
        }

        Ok(self)
    }
}

impl TryFrom<&str> for Author {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self> {
        let value = value.trim();
        if value.is_empty() {
            return Err(Error::malformed("author", "empty author"));
        }

        match value
            .strip_suffix('>')
            .and_then(|rest| rest.rsplit_once(" <"))
        {
            Some((name, email)) => Author::new(name.trim().to_string(), Some(email.to_string())),
            None => Author::new(value.to_string(), None),
        }
        .validated()
    }
}

/// Commit timestamp in seconds since the epoch
///
/// Honors TWIG_AUTHOR_DATE in either `%Y-%m-%d %H:%M:%S %z` or RFC 2822 form,
/// otherwise returns the current time.
pub fn load_timestamp_from_env() -> i64 {
    std::env::var(AUTHOR_DATE_VAR)
        .ok()
        .and_then(|date_str| {
            chrono::DateTime::parse_from_str(&date_str, "%Y-%m-%d %H:%M:%S %z")
                .or_else(|_| chrono::DateTime::parse_from_rfc2822(&date_str))
                .ok()
        })
        .map(|timestamp| timestamp.timestamp())
        .unwrap_or_else(|| chrono::Utc::now().timestamp())
}

/// Format a timestamp in human-readable form
///
/// # Returns
///
/// String like "Mon Jan 1 12:34:56 2024 +0000"
pub fn readable_timestamp(timestamp: i64) -> String {
    chrono::DateTime::from_timestamp(timestamp, 0)
        .map(|datetime| datetime.format("%a %b %-d %H:%M:%S %Y %z").to_string())
        .unwrap_or_else(|| timestamp.to_string())
}

/// Commit record
///
/// Immutable once written; identified by the SHA-1 of its serialization.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    /// Parent commit IDs (empty for the root commit, two for a merge commit)
    parents: Vec<ObjectId>,
    author: Author,
    /// Seconds since the epoch
    timestamp: i64,
    /// Staged files in staging order
    files: Vec<IndexEntry>,
    message: String,
}

impl Commit {
    pub fn new(
        parents: Vec<ObjectId>,
        author: Author,
        timestamp: i64,
        files: Vec<IndexEntry>,
        message: String,
    ) -> Self {
        Commit {
            parents,
            author,
            timestamp,
            files,
            message,
        }
    }

    /// Get the first line of the commit message
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parents(&self) -> &[ObjectId] {
        &self.parents
    }

    /// The first parent, i.e. the commit the author was on
    pub fn parent(&self) -> Option<&ObjectId> {
        self.parents.first()
    }

    pub fn author(&self) -> &Author {
        &self.author
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn readable_timestamp(&self) -> String {
        readable_timestamp(self.timestamp)
    }

    pub fn files(&self) -> &[IndexEntry] {
        &self.files
    }

    fn content(&self) -> String {
        let mut lines = vec![];

        for parent in &self.parents {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display_name()));
        lines.push(format!("timestamp {}", self.timestamp));
        for file in &self.files {
            lines.push(format!("file {} {}", file.oid, file.path_str()));
        }
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let content = self.content();

        let mut commit_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type(), content.len());
        commit_bytes.write_all(header.as_bytes())?;
        commit_bytes.write_all(content.as_bytes())?;

        Ok(Bytes::from(commit_bytes))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> Result<Self> {
        let bytes = reader
            .bytes()
            .collect::<std::result::Result<Vec<u8>, std::io::Error>>()?;

        let separator = bytes
            .iter()
            .position(|byte| *byte == 0)
            .ok_or_else(|| Error::malformed("commit object", "missing header"))?;
        let header = std::str::from_utf8(&bytes[..separator])
            .map_err(|e| Error::malformed("commit object", e))?;
        let size = header
            .strip_prefix(COMMIT_TYPE)
            .and_then(|rest| rest.strip_prefix(' '))
            .and_then(|size| size.parse::<usize>().ok())
            .ok_or_else(|| Error::malformed("commit object", format!("invalid header '{header}'")))?;

        let content = std::str::from_utf8(&bytes[separator + 1..])
            .map_err(|e| Error::malformed("commit object", e))?;
        if content.len() != size {
            return Err(Error::malformed(
                "commit object",
                format!("expected {} bytes, found {}", size, content.len()),
            ));
        }

        let (fields, message) = content
            .split_once("\n\n")
            .ok_or_else(|| Error::malformed("commit object", "missing message separator"))?;

        let mut parents = Vec::new();
        let mut author = None;
        let mut timestamp = None;
        let mut files = Vec::new();

        for line in fields.lines() {
            let (key, value) = line
                .split_once(' ')
                .ok_or_else(|| Error::malformed("commit object", format!("invalid line '{line}'")))?;

            match key {
                "parent" => parents.push(ObjectId::try_parse(value.to_string())?),
                "author" => author = Some(Author::try_from(value)?),
                "timestamp" => {
                    timestamp = Some(value.parse::<i64>().map_err(|_| {
                        Error::malformed("commit object", format!("invalid timestamp '{value}'"))
                    })?)
                }
                "file" => {
                    let (oid, path) = value.split_once(' ').ok_or_else(|| {
                        Error::malformed("commit object", format!("invalid file line '{line}'"))
                    })?;
                    files.push(IndexEntry::new(
                        PathBuf::from(path),
                        ObjectId::try_parse(oid.to_string())?,
                    ));
                }
                _ => {
                    return Err(Error::malformed(
                        "commit object",
                        format!("unknown field '{key}'"),
                    ));
                }
            }
        }

        let author = author.ok_or_else(|| Error::malformed("commit object", "missing author"))?;
        let timestamp =
            timestamp.ok_or_else(|| Error::malformed("commit object", "missing timestamp"))?;

        Ok(Self::new(
            parents,
            author,
            timestamp,
            files,
            message.to_string(),
        ))
    }
}

impl Object for Commit {
    fn object_type(&self) -> &'static str {
        COMMIT_TYPE
    }

    fn display(&self) -> String {
        self.content()
    }
}
