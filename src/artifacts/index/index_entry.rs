//! Index entry representation
//!
//! Each entry pairs a work-tree path with the SHA-1 of the file's raw bytes
//! at the time it was staged. The same pair is recorded in commit objects.

use crate::artifacts::index::FIELD_SEPARATOR;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Error, Result};
use derive_new::new;
use std::fmt;
use std::path::{Path, PathBuf};

/// A staged `(path, content-hash)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct IndexEntry {
    /// File path relative to the work tree root
    pub name: PathBuf,
    /// SHA-1 hash of file content
    pub oid: ObjectId,
}

impl IndexEntry {
    /// Build an entry for a work-tree path, rejecting paths a line cannot hold
    pub fn for_path(path: &Path, oid: ObjectId) -> Result<Self> {
        let name = path.to_str().ok_or_else(|| {
            Error::malformed("index entry", format!("path '{}' is not UTF-8", path.display()))
        })?;

        if name.contains(['\n', '\r']) {
            return Err(Error::malformed(
                "index entry",
                format!("path '{}' contains a line break", name.escape_debug()),
            ));
        }

        Ok(IndexEntry::new(PathBuf::from(normalize_path(path)), oid))
    }

    /// Parse a single `<path> <hash>` line
    pub fn parse_line(line: &str) -> Result<Self> {
        let (name, oid) = line
            .trim_end_matches(['\r', '\n'])
            .rsplit_once(FIELD_SEPARATOR)
            .ok_or_else(|| Error::malformed("index entry", format!("missing hash in '{line}'")))?;

        if name.is_empty() {
            return Err(Error::malformed(
                "index entry",
                format!("missing path in '{line}'"),
            ));
        }

        Ok(IndexEntry::new(
            PathBuf::from(name),
            ObjectId::try_parse(oid.to_string())?,
        ))
    }

    /// Render the entry as an index line (without the trailing newline)
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.path_str(), FIELD_SEPARATOR, self.oid)
    }

    /// The entry path with `/` separators
    pub fn path_str(&self) -> String {
        normalize_path(&self.name)
    }
}

impl fmt::Display for IndexEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_line())
    }
}

/// Render a relative path with `/` separators regardless of platform
pub fn normalize_path(path: &Path) -> String {
    path.components()
        .map(|component| component.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    const OID: &str = "0123456789abcdef0123456789abcdef01234567";

    #[rstest]
    #[case("x\nb")]
    #[case("dir/carriage\rreturn.txt")]
    fn rejects_paths_with_line_breaks(#[case] path: &str) {
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();

        assert!(matches!(
            IndexEntry::for_path(Path::new(path), oid),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn entry_for_path_reads_back_from_its_line() {
        let oid = ObjectId::try_parse(OID.to_string()).unwrap();
        let entry = IndexEntry::for_path(Path::new("dir/b c.txt"), oid).unwrap();

        assert_eq!(IndexEntry::parse_line(&entry.to_line()).unwrap(), entry);
    }

    #[rstest]
    #[case("a.txt", "a.txt")]
    #[case("dir/b.txt", "dir/b.txt")]
    #[case("with space.txt", "with space.txt")]
    fn parses_path_and_hash(#[case] path: &str, #[case] expected: &str) {
        let entry = IndexEntry::parse_line(&format!("{path} {OID}\n")).unwrap();

        assert_eq!(entry.path_str(), expected);
        assert_eq!(entry.oid.as_ref(), OID);
        assert_eq!(entry.to_line(), format!("{expected} {OID}"));
    }

    #[rstest]
    #[case("")]
    #[case("a.txt")]
    #[case(" 0123456789abcdef0123456789abcdef01234567")]
    #[case("a.txt not-a-hash")]
    fn rejects_malformed_lines(#[case] line: &str) {
        let result = IndexEntry::parse_line(line);

        assert!(matches!(result, Err(Error::MalformedRecord { .. })));
    }
}
