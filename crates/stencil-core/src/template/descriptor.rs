//! Descriptor file format

use crate::config::consts::DESCRIPTOR_EXTENSION;
use serde::{Deserialize, Serialize};
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// Parsed contents of a `<name>.template` file
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Descriptor {
    pub label: String,
    pub description: String,
    /// Inline content; its presence makes the template single-file
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    /// Appended to the user supplied name, e.g. `.rs`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

impl Descriptor {
    pub fn parse(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// A descriptor that failed to load
///
/// Recorded in the listing instead of aborting it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DescriptorError {
    pub path: PathBuf,
    pub reason: String,
}

impl fmt::Display for DescriptorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "DESCRIPTOR_INVALID: {}: {}",
            self.path.display(),
            self.reason
        )
    }
}

impl std::error::Error for DescriptorError {}

/// Whether a file name marks a descriptor
pub fn is_descriptor(file_name: &OsStr) -> bool {
    Path::new(file_name)
        .extension()
        .is_some_and(|ext| ext == DESCRIPTOR_EXTENSION)
}

/// Template name derived from a descriptor file name
///
/// `react-component.template` -> `react-component`. Returns `None` for
/// anything that is not a descriptor.
pub fn template_name(file_name: &OsStr) -> Option<String> {
    if !is_descriptor(file_name) {
        return None;
    }

    Path::new(file_name)
        .file_stem()
        .and_then(OsStr::to_str)
        .map(str::to_string)
}

/// File name of the descriptor for a template name
pub fn descriptor_file_name(name: &str) -> String {
    format!("{}.{}", name, DESCRIPTOR_EXTENSION)
}
