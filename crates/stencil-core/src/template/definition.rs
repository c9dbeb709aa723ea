//! Immutable template definitions

use super::descriptor::{descriptor_file_name, Descriptor};
use crate::error::{Result, StencilError};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Where a definition was loaded from
///
/// Ordered by precedence: a later origin overrides an earlier one on name
/// collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateOrigin {
    Builtin,
    User,
    Workspace,
}

impl TemplateOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateOrigin::Builtin => "builtin",
            TemplateOrigin::User => "user",
            TemplateOrigin::Workspace => "workspace",
        }
    }
}

/// Payload shape of a template
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateKind {
    /// Inline content written to `<name><extension>`
    SingleFile { content: String, extension: String },
    /// Sibling files and directories of the descriptor sharing its base name
    DirectoryFamily,
}

impl TemplateKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateKind::SingleFile { .. } => "file",
            TemplateKind::DirectoryFamily => "family",
        }
    }
}

/// One loaded template
///
/// Built once through [`TemplateDefinitionBuilder`] and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateDefinition {
    name: String,
    label: String,
    description: String,
    kind: TemplateKind,
    directory: Option<PathBuf>,
    origin: TemplateOrigin,
}

impl TemplateDefinition {
    pub fn builder(name: impl Into<String>) -> TemplateDefinitionBuilder {
        TemplateDefinitionBuilder::new(name)
    }

    /// Build a definition from a parsed descriptor found in `directory`
    pub fn from_descriptor(
        name: impl Into<String>,
        descriptor: Descriptor,
        directory: &Path,
        origin: TemplateOrigin,
    ) -> Result<Self> {
        let mut builder = Self::builder(name)
            .with_label(descriptor.label)
            .with_description(descriptor.description)
            .with_directory(directory)
            .with_origin(origin);

        if let Some(content) = descriptor.template {
            builder = builder.with_inline(content, descriptor.extension.unwrap_or_default());
        }

        builder.build()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn kind(&self) -> &TemplateKind {
        &self.kind
    }

    /// Directory holding the descriptor (and family members)
    ///
    /// `None` for templates compiled into the binary.
    pub fn directory(&self) -> Option<&Path> {
        self.directory.as_deref()
    }

    pub fn origin(&self) -> TemplateOrigin {
        self.origin
    }

    /// Path of the descriptor file, if the template lives on disk
    pub fn descriptor_path(&self) -> Option<PathBuf> {
        self.directory
            .as_ref()
            .map(|dir| dir.join(descriptor_file_name(&self.name)))
    }

    /// Whether `file_name` is a payload member of this directory-family
    ///
    /// Members are named exactly `<name>` or start with `<name>.`, and are not
    /// descriptors themselves.
    pub fn is_member(&self, file_name: &str) -> bool {
        if super::descriptor::is_descriptor(std::ffi::OsStr::new(file_name)) {
            return false;
        }

        match file_name.strip_prefix(self.name.as_str()) {
            Some(rest) => rest.is_empty() || rest.starts_with('.'),
            None => false,
        }
    }
}

/// Builder for [`TemplateDefinition`]
#[derive(Debug, Clone)]
pub struct TemplateDefinitionBuilder {
    name: String,
    label: Option<String>,
    description: String,
    inline: Option<(String, String)>,
    directory: Option<PathBuf>,
    origin: TemplateOrigin,
}

impl TemplateDefinitionBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            label: None,
            description: String::new(),
            inline: None,
            directory: None,
            origin: TemplateOrigin::Builtin,
        }
    }

    /// Set label (defaults to the name)
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Make this a single-file template
    pub fn with_inline(mut self, content: impl Into<String>, extension: impl Into<String>) -> Self {
        self.inline = Some((content.into(), extension.into()));
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = Some(directory.into());
        self
    }

    pub fn with_origin(mut self, origin: TemplateOrigin) -> Self {
        self.origin = origin;
        self
    }

    /// # Errors
    ///
    /// Returns `DescriptorInvalid` for an empty name or for a
    /// directory-family template without a directory.
    pub fn build(self) -> Result<TemplateDefinition> {
        if self.name.is_empty() {
            return Err(StencilError::DescriptorInvalid(
                "template name cannot be empty".to_string(),
            ));
        }

        let kind = match self.inline {
            Some((content, extension)) => TemplateKind::SingleFile { content, extension },
            None if self.directory.is_none() => {
                return Err(StencilError::DescriptorInvalid(format!(
                    "template '{}' has no inline content and no directory",
                    self.name
                )));
            }
            None => TemplateKind::DirectoryFamily,
        };

        Ok(TemplateDefinition {
            label: self.label.unwrap_or_else(|| self.name.clone()),
            name: self.name,
            description: self.description,
            kind,
            directory: self.directory,
            origin: self.origin,
        })
    }
}
