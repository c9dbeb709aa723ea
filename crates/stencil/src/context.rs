//! Per-invocation context for CLI commands

use anyhow::Result;
use std::env;
use std::path::PathBuf;
use stencil_core::config::Config;
use stencil_core::path::find_workspace_root;
use stencil_core::TemplateRepository;

/// Workspace, config and template repository for one command
pub struct Context {
    pub workspace_root: PathBuf,
    pub config: Config,
    pub repository: TemplateRepository,
    pub verbose: bool,
}

impl Context {
    /// Resolve the workspace and load its config
    ///
    /// Workspace root: `--workspace`, else the nearest ancestor of the
    /// current directory containing `.stencil/`, else the current directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or the
    /// config file cannot be parsed.
    pub fn new(workspace: Option<PathBuf>, verbose: bool) -> Result<Self> {
        let current_dir = env::current_dir()?;
        let workspace_root = match workspace {
            Some(root) => root,
            None => find_workspace_root(&current_dir).unwrap_or(current_dir),
        };

        let config = Config::load_or_default(&workspace_root)?;
        let repository = TemplateRepository::from_config(&config, &workspace_root);

        tracing::debug!("Workspace root: {}", workspace_root.display());

        Ok(Self {
            workspace_root,
            config,
            repository,
            verbose,
        })
    }
}
