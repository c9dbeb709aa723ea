//! Workspace configuration
//!
//! Configuration is optional. Without `.stencil/config.toml` every setting
//! takes its default.

pub mod consts;
mod model;

pub use model::{Config, TemplatesConfig};

use crate::error::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Parse a config file
    ///
    /// # Errors
    ///
    /// Returns `IoError` if the file cannot be read and `ConfigParseError`
    /// if it is not valid TOML for this schema.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load `<root>/.stencil/config.toml`, or defaults if it does not exist
    pub fn load_or_default(workspace_root: &Path) -> Result<Self> {
        let path = Self::path_in(workspace_root);
        if path.is_file() {
            tracing::debug!("Loading config from {}", path.display());
            Self::from_file(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Location of the config file for a workspace root
    pub fn path_in(workspace_root: &Path) -> PathBuf {
        workspace_root
            .join(consts::WORKSPACE_MARKER_DIR)
            .join(consts::CONFIG_FILE)
    }

    /// Per-user template directory
    ///
    /// Resolution order:
    /// 1. `STENCIL_TEMPLATES_DIR`
    /// 2. `templates.global_dir`
    /// 3. `<platform config dir>/stencil/templates`
    ///
    /// `None` only when no platform config dir exists and nothing is set.
    pub fn user_templates_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = std::env::var_os(consts::TEMPLATES_DIR_ENV) {
            if !dir.is_empty() {
                return Some(PathBuf::from(dir));
            }
        }

        if let Some(dir) = &self.templates.global_dir {
            return Some(dir.clone());
        }

        dirs::config_dir().map(|d| d.join(consts::APP_DIR).join(consts::USER_TEMPLATES_DIR))
    }

    /// Workspace template directory for a given root
    pub fn workspace_templates_dir(&self, workspace_root: &Path) -> PathBuf {
        workspace_root.join(&self.templates.workspace_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use stencil_testkit::temp_dir_in_workspace;

    #[test]
    fn test_defaults_without_file() {
        let temp = temp_dir_in_workspace();
        let config = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(config.templates.include_builtin);
        assert_eq!(
            config.workspace_templates_dir(temp.path()),
            temp.path().join(".stencil/templates")
        );
    }

    #[test]
    fn test_load_partial_file() {
        let temp = temp_dir_in_workspace();
        let dir = temp.path().join(".stencil");
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("config.toml"),
            "[templates]\ninclude_builtin = false\nworkspace_dir = \"tpl\"\n",
        )
        .unwrap();

        let config = Config::load_or_default(temp.path()).unwrap();
        assert!(!config.templates.include_builtin);
        assert!(config.templates.global_dir.is_none());
        assert_eq!(
            config.workspace_templates_dir(temp.path()),
            temp.path().join("tpl")
        );
    }

    #[test]
    fn test_empty_file_is_default() {
        let temp = temp_dir_in_workspace();
        let dir = temp.path().join(".stencil");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "").unwrap();

        let config = Config::load_or_default(temp.path()).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let temp = temp_dir_in_workspace();
        let dir = temp.path().join(".stencil");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("config.toml"), "[templates\ninclude_builtin = ").unwrap();

        let err = Config::load_or_default(temp.path()).unwrap_err();
        assert!(err.to_string().starts_with("CONFIG_PARSE_ERROR:"));
    }

    #[test]
    fn test_user_templates_dir_from_config() {
        stencil_testkit::with_env_var("STENCIL_TEMPLATES_DIR", None, || {
            let config = Config {
                templates: TemplatesConfig {
                    global_dir: Some(PathBuf::from("/opt/stencil")),
                    ..TemplatesConfig::default()
                },
            };
            assert_eq!(
                config.user_templates_dir(),
                Some(PathBuf::from("/opt/stencil"))
            );
        });
    }

    #[test]
    fn test_user_templates_dir_env_wins() {
        stencil_testkit::with_env_var("STENCIL_TEMPLATES_DIR", Some("/env/dir"), || {
            let config = Config {
                templates: TemplatesConfig {
                    global_dir: Some(PathBuf::from("/opt/stencil")),
                    ..TemplatesConfig::default()
                },
            };
            assert_eq!(config.user_templates_dir(), Some(PathBuf::from("/env/dir")));
        });
    }
}
