//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character lowercase hexadecimal strings. They identify
//! commit records in the object store and file contents in the index.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc1234")
//!
//! ## Storage
//!
//! Commit objects are stored flat as `.twig/objects/<40-hex>`

use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::errors::{Error, Result};
use sha1::{Digest, Sha1};
use std::path::PathBuf;

const SHORT_OID_LENGTH: usize = 7;

/// SHA-1 object identifier
///
/// Always holds exactly 40 lowercase hexadecimal characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate an object ID from a string
    ///
    /// Uppercase hex digits are accepted and normalized to lowercase.
    pub fn try_parse(id: String) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(Error::malformed(
                "object id",
                format!("invalid length {} for '{}'", id.len(), id),
            ));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::malformed(
                "object id",
                format!("invalid characters in '{}'", id),
            ));
        }
        Ok(Self(id.to_ascii_lowercase()))
    }

    /// Build an object ID from a finished SHA-1 hasher
    pub fn from_hasher(hasher: Sha1) -> Self {
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Hash a byte slice in one go
    pub fn hash_bytes(data: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(data);
        Self::from_hasher(hasher)
    }

    /// Relative path of the object file inside the objects directory
    pub fn to_path(&self) -> PathBuf {
        PathBuf::from(&self.0)
    }

    /// First 7 characters of the hash
    pub fn to_short_oid(&self) -> String {
        self.0[..SHORT_OID_LENGTH].to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hashes_empty_input_like_sha1sum() {
        let oid = ObjectId::hash_bytes(b"");
        assert_eq!(oid.as_ref(), "da39a3ee5e6b4b0d3255bfef95601890afd80709");
        assert_eq!(oid.to_short_oid(), "da39a3e");
    }

    #[test]
    fn rejects_wrong_length_and_non_hex() {
        assert!(ObjectId::try_parse("abc".to_string()).is_err());
        assert!(ObjectId::try_parse("z".repeat(40)).is_err());
    }

    #[test]
    fn normalizes_uppercase_hex() {
        let oid = ObjectId::try_parse("A".repeat(40)).unwrap();
        assert_eq!(oid.as_ref(), "a".repeat(40));
    }
}
