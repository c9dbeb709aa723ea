//! Names and locations shared across the workspace

/// Directory marking a workspace root; also holds workspace config and templates
pub const WORKSPACE_MARKER_DIR: &str = ".stencil";

/// Workspace config file, relative to [`WORKSPACE_MARKER_DIR`]
pub const CONFIG_FILE: &str = "config.toml";

/// Default workspace template directory, relative to the workspace root
pub const DEFAULT_WORKSPACE_TEMPLATES_DIR: &str = ".stencil/templates";

/// Sub-directory of the platform config dir holding per-user templates
pub const APP_DIR: &str = "stencil";

/// Per-user templates live in `<config dir>/stencil/templates`
pub const USER_TEMPLATES_DIR: &str = "templates";

/// Environment variable overriding the per-user template directory
pub const TEMPLATES_DIR_ENV: &str = "STENCIL_TEMPLATES_DIR";

/// Extension marking a file as a template descriptor rather than payload
pub const DESCRIPTOR_EXTENSION: &str = "template";
