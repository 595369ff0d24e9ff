//! Atomic file replacement
//!
//! Every durable file (objects, refs, HEAD, index) is written to a temporary
//! sibling first and then renamed over the target, so an interrupted write
//! never leaves a truncated file behind. Readers take a shared lock and
//! writers an exclusive lock on the file being replaced.

use crate::errors::Result;
use file_guard::Lock;
use std::io::{Read, Write};
use std::ops::DerefMut;
use std::path::{Path, PathBuf};

/// Replace `path` with `content` in a single rename
pub fn write_atomically(path: &Path, content: &[u8]) -> Result<()> {
    let parent = path.parent().unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(parent)?;

    let temp_path = temp_path_for(path, parent);
    let written = write_temp(&temp_path, content).and_then(|_| swap_into_place(&temp_path, path));

    if written.is_err() {
        let _ = std::fs::remove_file(&temp_path);
    }

    written
}

/// Read the whole file under a shared lock
///
/// Returns `None` when the file does not exist.
pub fn read_locked(path: &Path) -> Result<Option<Vec<u8>>> {
    let mut file = match std::fs::OpenOptions::new().read(true).open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    if file.metadata()?.len() == 0 {
        return Ok(Some(Vec::new()));
    }

    let mut lock = file_guard::lock(&mut file, Lock::Shared, 0, 1)?;
    let mut content = Vec::new();
    lock.deref_mut().read_to_end(&mut content)?;

    Ok(Some(content))
}

fn write_temp(temp_path: &Path, content: &[u8]) -> Result<()> {
    let mut file = std::fs::OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(temp_path)?;
    file.write_all(content)?;
    file.sync_all()?;

    Ok(())
}

fn swap_into_place(temp_path: &Path, path: &Path) -> Result<()> {
    match std::fs::OpenOptions::new().read(true).write(true).open(path) {
        Ok(mut existing) if existing.metadata()?.len() > 0 => {
            let _lock = file_guard::lock(&mut existing, Lock::Exclusive, 0, 1)?;
            std::fs::rename(temp_path, path)?;
        }
        _ => std::fs::rename(temp_path, path)?,
    }

    Ok(())
}

fn temp_path_for(path: &Path, parent: &Path) -> PathBuf {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();

    parent.join(format!(".{}.tmp-{}", file_name, fake::rand::random::<u32>()))
}
