#![allow(dead_code)]

pub mod command;
pub mod file;

/// Read a file from the repository directory as a string
pub fn read_twig_file(dir: &std::path::Path, relative_path: &str) -> String {
    std::fs::read_to_string(dir.join(".twig").join(relative_path))
        .unwrap_or_else(|e| panic!("Failed to read .twig/{}: {}", relative_path, e))
}

/// Number of stored objects
pub fn object_count(dir: &std::path::Path) -> usize {
    std::fs::read_dir(dir.join(".twig").join("objects"))
        .map(|entries| {
            entries
                .filter_map(|entry| entry.ok())
                .filter(|entry| !entry.file_name().to_string_lossy().starts_with('.'))
                .count()
        })
        .unwrap_or(0)
}

/// Hash stored in a branch ref, if any
pub fn branch_oid(dir: &std::path::Path, branch: &str) -> Option<String> {
    std::fs::read_to_string(dir.join(".twig").join("refs").join("heads").join(branch))
        .ok()
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
}
