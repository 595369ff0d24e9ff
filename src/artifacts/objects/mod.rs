//! Stored object types
//!
//! The object store only holds commit records. File contents are never
//! stored: a commit names each file by the SHA-1 of its bytes.
//!
//! All objects are serialized as `<type> <size>\0<content>` and identified by
//! the SHA-1 of that serialization.

pub mod commit;
pub mod object;
pub mod object_id;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;
