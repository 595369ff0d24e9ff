use crate::areas::repository::REPOSITORY_DIR;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::{Entity, Error, Result};
use sha1::{Digest, Sha1};
use std::io::Read;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

const IGNORED_PATHS: [&str; 3] = [REPOSITORY_DIR, ".", ".."];

/// Size of the chunks file contents are hashed in
pub const HASH_CHUNK_SIZE: usize = 8192;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a user-supplied path to a path relative to the work tree root
    ///
    /// Relative inputs are taken relative to the root. Fails with `NotFound`
    /// when the path does not exist or lies outside the work tree.
    pub fn relative_path(&self, path: &Path) -> Result<PathBuf> {
        let absolute_path = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.path.join(path)
        };

        let absolute_path = match absolute_path.canonicalize() {
            Ok(absolute_path) => absolute_path,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(Entity::Path, path.display()));
            }
            Err(e) => return Err(e.into()),
        };

        absolute_path
            .strip_prefix(&self.path)
            .map(PathBuf::from)
            .map_err(|_| Error::not_found(Entity::Path, path.display()))
    }

    /// Whether a relative path lies inside the repository directory
    pub fn is_internal(path: &Path) -> bool {
        path.components().any(|component| {
            if let Component::Normal(name) = component {
                IGNORED_PATHS.contains(&name.to_string_lossy().as_ref())
            } else {
                false
            }
        })
    }

    /// Regular files under `relative_path` (the whole tree when `None`)
    ///
    /// Paths are relative to the work tree root, sorted, and never include the
    /// repository directory. A file path lists just that file.
    pub fn list_files(&self, relative_path: Option<&Path>) -> Result<Vec<PathBuf>> {
        let root_file_path = match relative_path {
            Some(relative_path) => self.path.join(relative_path),
            None => self.path.to_path_buf(),
        };

        if !root_file_path.exists() {
            return Err(Error::not_found(Entity::Path, root_file_path.display()));
        }

        let mut files = Vec::new();
        let walker = WalkDir::new(&root_file_path)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.depth() == 0 || entry.file_name() != REPOSITORY_DIR);

        for entry in walker {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }

            if let Ok(relative) = entry.path().strip_prefix(&self.path)
                && !Self::is_internal(relative)
            {
                files.push(relative.to_path_buf());
            }
        }

        Ok(files)
    }

    /// SHA-1 of a file's raw bytes, read in fixed-size chunks
    pub fn hash_file(&self, relative_path: &Path) -> Result<ObjectId> {
        let file_path = self.path.join(relative_path);
        let mut file = match std::fs::File::open(&file_path) {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(Error::not_found(Entity::Path, relative_path.display()));
            }
            Err(e) => return Err(e.into()),
        };

        let mut hasher = Sha1::new();
        let mut buffer = [0u8; HASH_CHUNK_SIZE];
        loop {
            let read = file.read(&mut buffer)?;
            if read == 0 {
                break;
            }
            hasher.update(&buffer[..read]);
        }

        Ok(ObjectId::from_hasher(hasher))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    #[fixture]
    fn work_tree() -> TempDir {
        let dir = TempDir::new().expect("Failed to create temp dir");
        dir.child("a.txt").write_str("alpha").unwrap();
        dir.child("src/b.txt").write_str("beta").unwrap();
        dir.child(".twig/HEAD").write_str("ref: refs/heads/main\n").unwrap();
        dir
    }

    fn workspace(dir: &TempDir) -> Workspace {
        Workspace::new(dir.path().canonicalize().unwrap().into_boxed_path())
    }

    #[rstest]
    fn lists_files_without_repository_dir(work_tree: TempDir) {
        let files = workspace(&work_tree).list_files(None).unwrap();

        assert_eq!(
            files,
            vec![PathBuf::from("a.txt"), PathBuf::from("src/b.txt")]
        );
    }

    #[rstest]
    fn lists_a_single_directory(work_tree: TempDir) {
        let files = workspace(&work_tree)
            .list_files(Some(Path::new("src")))
            .unwrap();

        assert_eq!(files, vec![PathBuf::from("src/b.txt")]);
    }

    #[rstest]
    fn hashes_like_sha1_of_raw_bytes(work_tree: TempDir) {
        let large = "x".repeat(HASH_CHUNK_SIZE * 3 + 17);
        work_tree.child("large.bin").write_str(&large).unwrap();
        let workspace = workspace(&work_tree);

        assert_eq!(
            workspace.hash_file(Path::new("a.txt")).unwrap(),
            ObjectId::hash_bytes(b"alpha")
        );
        assert_eq!(
            workspace.hash_file(Path::new("large.bin")).unwrap(),
            ObjectId::hash_bytes(large.as_bytes())
        );
    }

    #[rstest]
    fn missing_path_is_not_found(work_tree: TempDir) {
        let result = workspace(&work_tree).relative_path(Path::new("nope.txt"));

        assert!(matches!(
            result,
            Err(Error::NotFound {
                what: Entity::Path,
                ..
            })
        ));
    }

    #[rstest]
    fn resolves_relative_and_root_paths(work_tree: TempDir) {
        let workspace = workspace(&work_tree);

        assert_eq!(
            workspace.relative_path(Path::new("src/b.txt")).unwrap(),
            PathBuf::from("src/b.txt")
        );
        assert_eq!(
            workspace.relative_path(Path::new(".")).unwrap(),
            PathBuf::new()
        );
    }
}
