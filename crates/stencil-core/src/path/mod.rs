//! Path validation and destination resolution
//!
//! `Path::is_absolute()` differs between platforms: `/tmp` is absolute on Unix
//! but only rooted on Windows. Checks here are component based so that user
//! supplied names are rejected the same way everywhere.

use crate::config::consts::WORKSPACE_MARKER_DIR;
use crate::error::{Result, StencilError};
use std::path::{Component, Path, PathBuf};

/// Check if path is absolute OR rooted (cross-platform)
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use stencil_core::path::has_absolute_or_rooted_component;
///
/// assert!(has_absolute_or_rooted_component(Path::new("/tmp")));
/// assert!(!has_absolute_or_rooted_component(Path::new("foo/bar")));
/// ```
pub fn has_absolute_or_rooted_component(path: &Path) -> bool {
    if path.is_absolute() {
        return true;
    }

    path.components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)))
}

/// Validate a user supplied name before it is substituted into paths
///
/// Blocks:
/// - Empty names
/// - Absolute or rooted paths (e.g., `/tmp/foo`, `C:\Windows`)
/// - Parent directory traversal (`..`) and current directory (`.`)
/// - Path separators (multiple components like `foo/bar`)
///
/// # Examples
///
/// ```
/// # use stencil_core::path::validate_name;
/// assert!(validate_name("widget").is_ok());
/// assert!(validate_name("../../../etc/passwd").is_err());
/// assert!(validate_name("foo/bar").is_err());
/// ```
pub fn validate_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(invalid("Name cannot be empty".to_string()));
    }

    let path = Path::new(name);

    if has_absolute_or_rooted_component(path) {
        return Err(invalid(format!(
            "Name cannot be an absolute path: '{}'",
            name
        )));
    }

    let mut normal_count = 0;

    for component in path.components() {
        match component {
            Component::Normal(_) => normal_count += 1,
            Component::Prefix(_) => {
                return Err(invalid(format!(
                    "Name cannot contain drive prefix: '{}'",
                    name
                )))
            }
            Component::RootDir => {
                return Err(invalid(format!(
                    "Name cannot be an absolute path: '{}'",
                    name
                )))
            }
            Component::CurDir => {
                return Err(invalid(format!(
                    "Name cannot contain current directory (.): '{}'",
                    name
                )))
            }
            Component::ParentDir => {
                return Err(invalid(format!(
                    "Name cannot contain parent directory (..): '{}'",
                    name
                )))
            }
        }
    }

    // `Path::components` drops a trailing separator, so "foo/" would pass
    if normal_count != 1 || name.ends_with('/') || name.ends_with('\\') {
        return Err(invalid(format!(
            "Name must be a single file name without path separators: '{}'",
            name
        )));
    }

    Ok(())
}

fn invalid(message: String) -> StencilError {
    StencilError::NameInvalid(message)
}

/// Resolve the directory new files are created in
///
/// A path naming an existing file resolves to its parent directory, the same
/// way a "new file here" action on a file targets the folder containing it.
pub async fn resolve_destination_dir(path: &Path) -> Result<PathBuf> {
    let metadata = tokio::fs::metadata(path).await?;
    if metadata.is_dir() {
        return Ok(path.to_path_buf());
    }

    Ok(path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// Find the workspace root by searching upward for a `.stencil/` directory
///
/// Returns `None` when no ancestor of `start` carries the marker.
pub fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| dir.join(WORKSPACE_MARKER_DIR).is_dir())
        .map(Path::to_path_buf)
}
