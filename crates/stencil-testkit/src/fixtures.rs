//! Template fixtures
//!
//! Small helpers for laying out template trees on disk.

use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Write `content` to `root/relative`, creating parent directories
///
/// Returns the full path written.
pub fn write_file(root: &Path, relative: &str, content: &str) -> PathBuf {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create fixture directory");
    }
    std::fs::write(&path, content).expect("Failed to write fixture file");
    path
}

/// Write `<dir>/<name>.template` with the given JSON body
pub fn write_descriptor(dir: &Path, name: &str, json: &str) -> PathBuf {
    write_file(dir, &format!("{}.template", name), json)
}

/// All files under `root`, as sorted `/`-separated relative paths
///
/// Directories are not listed, empty ones included.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = WalkDir::new(root)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .filter_map(|entry| {
            entry.path().strip_prefix(root).ok().map(|rel| {
                rel.components()
                    .map(|c| c.as_os_str().to_string_lossy().into_owned())
                    .collect::<Vec<_>>()
                    .join("/")
            })
        })
        .collect();
    files.sort();
    files
}
