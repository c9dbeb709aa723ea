use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `.stencil/config.toml` schema
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub templates: TemplatesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemplatesConfig {
    /// Merge the templates compiled into the binary
    #[serde(default = "default_include_builtin")]
    pub include_builtin: bool,
    /// Per-user template directory (overridden by `STENCIL_TEMPLATES_DIR`)
    #[serde(default)]
    pub global_dir: Option<PathBuf>,
    /// Relative to the workspace root unless absolute
    #[serde(default = "default_workspace_dir")]
    pub workspace_dir: PathBuf,
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            include_builtin: default_include_builtin(),
            global_dir: None,
            workspace_dir: default_workspace_dir(),
        }
    }
}

fn default_include_builtin() -> bool {
    true
}

fn default_workspace_dir() -> PathBuf {
    PathBuf::from(super::consts::DEFAULT_WORKSPACE_TEMPLATES_DIR)
}
