//! Template repository
//!
//! The repository is a plain value owned by the caller. Every listing
//! re-reads the template directories, so templates added or edited on disk
//! are picked up by the next call.

use super::builtin::builtin_templates;
use super::definition::{TemplateDefinition, TemplateOrigin};
use super::descriptor::{descriptor_file_name, template_name, Descriptor, DescriptorError};
use crate::config::Config;
use crate::error::{Result, StencilError};
use futures_util::future::join_all;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// A directory of descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
struct TemplateDir {
    dir: PathBuf,
    origin: TemplateOrigin,
    create_if_missing: bool,
}

/// Merged result of one listing
#[derive(Debug, Default)]
pub struct TemplateListing {
    /// Keyed by template name; later sources override earlier ones
    pub templates: BTreeMap<String, TemplateDefinition>,
    /// Descriptors that failed to load, in source order
    pub errors: Vec<DescriptorError>,
}

impl TemplateListing {
    pub fn get(&self, name: &str) -> Option<&TemplateDefinition> {
        self.templates.get(name)
    }

    fn insert(&mut self, def: TemplateDefinition) {
        if let Some(previous) = self.templates.get(def.name()) {
            tracing::debug!(
                "Template '{}' from {} overrides {}",
                def.name(),
                def.origin().as_str(),
                previous.origin().as_str()
            );
        }
        self.templates.insert(def.name().to_string(), def);
    }
}

/// Resolves template names to definitions
///
/// Sources, lowest precedence first:
/// 1. Builtin templates (optional)
/// 2. Per-user directory, created if absent
/// 3. Workspace directory, read only if present
#[derive(Debug, Clone, Default)]
pub struct TemplateRepository {
    include_builtin: bool,
    dirs: Vec<TemplateDir>,
}

impl TemplateRepository {
    /// An empty repository with no sources
    pub fn new() -> Self {
        Self::default()
    }

    /// Repository for a workspace, following its configuration
    pub fn from_config(config: &Config, workspace_root: &Path) -> Self {
        let mut repo = Self::new().with_builtin(config.templates.include_builtin);

        if let Some(user_dir) = config.user_templates_dir() {
            repo = repo.with_user_dir(user_dir);
        }

        repo.with_workspace_dir(config.workspace_templates_dir(workspace_root))
    }

    pub fn with_builtin(mut self, include: bool) -> Self {
        self.include_builtin = include;
        self
    }

    pub fn with_user_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(TemplateDir {
            dir: dir.into(),
            origin: TemplateOrigin::User,
            create_if_missing: true,
        });
        self
    }

    pub fn with_workspace_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.dirs.push(TemplateDir {
            dir: dir.into(),
            origin: TemplateOrigin::Workspace,
            create_if_missing: false,
        });
        self
    }

    /// Directory for templates of the given origin, if configured
    pub fn dir_for(&self, origin: TemplateOrigin) -> Option<&Path> {
        self.dirs
            .iter()
            .rev()
            .find(|d| d.origin == origin)
            .map(|d| d.dir.as_path())
    }

    /// List every template from every source
    ///
    /// A malformed descriptor is recorded in [`TemplateListing::errors`] and
    /// does not affect other templates.
    ///
    /// # Errors
    ///
    /// Returns `TemplateDirUnreadable` if an existing source directory
    /// cannot be listed.
    pub async fn list_templates(&self) -> Result<TemplateListing> {
        let mut listing = TemplateListing::default();

        if self.include_builtin {
            let (templates, errors) = builtin_templates();
            templates.into_iter().for_each(|def| listing.insert(def));
            listing.errors.extend(errors);
        }

        for source in &self.dirs {
            if source.create_if_missing {
                ensure_dir(&source.dir).await;
            }

            for loaded in read_dir(&source.dir, source.origin).await? {
                match loaded {
                    Ok(def) => listing.insert(def),
                    Err(err) => {
                        tracing::warn!("{}", err);
                        listing.errors.push(err);
                    }
                }
            }
        }

        Ok(listing)
    }

    /// Look up a single template by name
    ///
    /// # Errors
    ///
    /// Returns `TemplateNotFound` if no source defines `name`.
    pub async fn get(&self, name: &str) -> Result<TemplateDefinition> {
        let mut listing = self.list_templates().await?;
        listing
            .templates
            .remove(name)
            .ok_or_else(|| StencilError::TemplateNotFound(name.to_string()))
    }

    /// Write a new descriptor into the directory for `origin`
    ///
    /// # Errors
    ///
    /// Returns `TemplateExists` if the descriptor file is already present
    /// and `Generic` if no directory is configured for `origin`.
    pub async fn create_descriptor(
        &self,
        origin: TemplateOrigin,
        name: &str,
        descriptor: &Descriptor,
    ) -> Result<PathBuf> {
        let dir = self.dir_for(origin).ok_or_else(|| {
            StencilError::Generic(format!("No {} template directory configured", origin.as_str()))
        })?;

        fs::create_dir_all(dir).await?;

        let path = dir.join(descriptor_file_name(name));
        let content = descriptor.to_json_pretty()?;

        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StencilError::TemplateExists(path));
            }
            Err(e) => return Err(e.into()),
        };

        file.write_all(content.as_bytes()).await?;
        file.write_all(b"\n").await?;
        file.flush().await?;

        Ok(path)
    }
}

/// Create `dir` if it is missing
///
/// Failure is not fatal: the directory may still be readable, and a missing
/// directory lists as empty.
async fn ensure_dir(dir: &Path) {
    match fs::metadata(dir).await {
        Ok(metadata) if metadata.is_dir() => {}
        _ => {
            if let Err(e) = fs::create_dir_all(dir).await {
                tracing::debug!("Could not create template dir {}: {}", dir.display(), e);
            }
        }
    }
}

type Loaded = std::result::Result<TemplateDefinition, DescriptorError>;

/// Load every descriptor in `dir`
async fn read_dir(dir: &Path, origin: TemplateOrigin) -> Result<Vec<Loaded>> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
        Err(source) => {
            return Err(StencilError::TemplateDirUnreadable {
                path: dir.to_path_buf(),
                source,
            })
        }
    };

    let mut descriptors = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(source) => {
                return Err(StencilError::TemplateDirUnreadable {
                    path: dir.to_path_buf(),
                    source,
                })
            }
        };

        if let Some(name) = template_name(&entry.file_name()) {
            descriptors.push((name, entry.path()));
        }
    }
    descriptors.sort();

    let loads = descriptors
        .into_iter()
        .map(|(name, path)| load_descriptor(name, path, dir, origin));

    Ok(join_all(loads).await)
}

async fn load_descriptor(
    name: String,
    path: PathBuf,
    dir: &Path,
    origin: TemplateOrigin,
) -> Loaded {
    let fail = |path: PathBuf, reason: String| DescriptorError { path, reason };

    let content = match fs::read_to_string(&path).await {
        Ok(content) => content,
        Err(e) => return Err(fail(path, e.to_string())),
    };

    let descriptor = match Descriptor::parse(&content) {
        Ok(descriptor) => descriptor,
        Err(e) => return Err(fail(path, e.to_string())),
    };

    match TemplateDefinition::from_descriptor(name, descriptor, dir, origin) {
        Ok(def) => {
            tracing::debug!("Loaded template '{}' from {}", def.name(), path.display());
            Ok(def)
        }
        Err(e) => Err(fail(path, e.to_string())),
    }
}
