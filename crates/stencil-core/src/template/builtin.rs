//! Templates compiled into the binary

use super::definition::{TemplateDefinition, TemplateOrigin};
use super::descriptor::{descriptor_file_name, Descriptor, DescriptorError};
use std::path::PathBuf;

const BUILTIN_DESCRIPTORS: &[(&str, &str)] = &[
    (
        "markdown",
        include_str!("../../builtin_templates/markdown.template"),
    ),
    (
        "rust-module",
        include_str!("../../builtin_templates/rust-module.template"),
    ),
    (
        "shell-script",
        include_str!("../../builtin_templates/shell-script.template"),
    ),
];

/// Load every builtin template
///
/// Builtins are single-file only: they have no directory on disk for family
/// members to live in.
pub(crate) fn builtin_templates() -> (Vec<TemplateDefinition>, Vec<DescriptorError>) {
    let mut templates = Vec::new();
    let mut errors = Vec::new();

    for (name, source) in BUILTIN_DESCRIPTORS {
        match load_builtin(name, source) {
            Ok(def) => templates.push(def),
            Err(reason) => errors.push(DescriptorError {
                path: PathBuf::from("<builtin>").join(descriptor_file_name(name)),
                reason,
            }),
        }
    }

    (templates, errors)
}

fn load_builtin(name: &str, source: &str) -> Result<TemplateDefinition, String> {
    let descriptor = Descriptor::parse(source).map_err(|e| e.to_string())?;

    let content = descriptor
        .template
        .ok_or_else(|| "builtin templates must carry inline content".to_string())?;

    TemplateDefinition::builder(name)
        .with_label(descriptor.label)
        .with_description(descriptor.description)
        .with_inline(content, descriptor.extension.unwrap_or_default())
        .with_origin(TemplateOrigin::Builtin)
        .build()
        .map_err(|e| e.to_string())
}
