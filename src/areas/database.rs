//! Object store
//!
//! Commit records are stored zlib-compressed under `.twig/objects/<oid>`,
//! where the oid is the SHA-1 of the uncompressed serialization. Objects are
//! written once and never overwritten or removed.

use crate::artifacts::core::atomic_file;
use crate::artifacts::log::rev_list::CommitSource;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Entity, Error, Result};
use bytes::Bytes;
use derive_new::new;
use std::io::{Cursor, Read, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, new)]
pub struct Database {
    path: Box<Path>,
}

impl Database {
    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Store an object and return its id
    ///
    /// Storing content that is already present is a no-op.
    pub fn store(&self, object: &impl Object) -> Result<ObjectId> {
        let object_content = object.serialize()?;
        let object_id = ObjectId::hash_bytes(&object_content);
        let object_path = self.object_path(&object_id);

        if object_path.exists() {
            debug!(oid = %object_id, "object already stored");
        } else {
            self.write_object(&object_path, object_content)?;
            info!(oid = %object_id, kind = object.object_type(), "stored object");
        }

        Ok(object_id)
    }

    /// Load a commit record, failing with `NotFound` when it is absent
    pub fn load(&self, object_id: &ObjectId) -> Result<Commit> {
        self.load_if_present(object_id)?
            .ok_or_else(|| Error::not_found(Entity::Object, object_id))
    }

    /// Load a commit record, returning `None` when it is absent
    ///
    /// A present but unreadable object is a `MalformedRecord` error.
    pub fn load_if_present(&self, object_id: &ObjectId) -> Result<Option<Commit>> {
        let object_path = self.object_path(object_id);

        let Some(object_content) = atomic_file::read_locked(&object_path)? else {
            return Ok(None);
        };

        let object_content = Self::decompress(object_content.into())
            .map_err(|e| Error::malformed(format!("object {object_id}"), e))?;

        Commit::deserialize(Cursor::new(object_content))
            .map(Some)
            .map_err(|e| match e {
                Error::MalformedRecord { reason, .. } => {
                    Error::malformed(format!("object {object_id}"), reason)
                }
                other => other,
            })
    }

    fn object_path(&self, object_id: &ObjectId) -> PathBuf {
        self.path.join(object_id.to_path())
    }

    fn write_object(&self, object_path: &Path, object_content: Bytes) -> Result<()> {
        let object_content = Self::compress(object_content)?;

        atomic_file::write_atomically(object_path, &object_content)
    }

    fn compress(data: Bytes) -> Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(&data)?;

        Ok(encoder.finish()?.into())
    }

    fn decompress(data: Bytes) -> std::io::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }
}

impl CommitSource for Database {
    fn load_commit(&self, oid: &ObjectId) -> Result<Option<Commit>> {
        self.load_if_present(oid)
    }
}
