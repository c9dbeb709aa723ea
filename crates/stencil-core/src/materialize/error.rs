//! Per-file materialization failures

use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single branch of a materialization
///
/// Each failure is scoped to one file or directory; siblings are unaffected.
#[derive(Error, Debug)]
pub enum MaterializeError {
    #[error("TEMPLATE_READ_FAILED: cannot read template '{}': {source}", path.display())]
    TemplateRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error(
        "DESTINATION_EXISTS: '{}' already exists. Please retry with another name",
        path.display()
    )]
    Collision { path: PathBuf },

    #[error("WRITE_FAILED: cannot create '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl MaterializeError {
    /// Path the failure refers to (template source for read failures,
    /// destination otherwise)
    pub fn path(&self) -> &Path {
        match self {
            MaterializeError::TemplateRead { path, .. }
            | MaterializeError::Collision { path }
            | MaterializeError::Write { path, .. } => path,
        }
    }

    /// Stable machine-readable code
    pub fn code(&self) -> &'static str {
        match self {
            MaterializeError::TemplateRead { .. } => "TEMPLATE_READ_FAILED",
            MaterializeError::Collision { .. } => "DESTINATION_EXISTS",
            MaterializeError::Write { .. } => "WRITE_FAILED",
        }
    }
}
