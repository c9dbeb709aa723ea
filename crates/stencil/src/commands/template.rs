//! Template command - manage descriptors

use crate::context::Context;
use crate::output::print_text;
use anyhow::{Result, bail};
use colored::Colorize;
use stencil_core::TemplateOrigin;
use stencil_core::path::validate_name;
use stencil_core::template::Descriptor;

pub struct NewTemplateArgs {
    pub name: String,
    pub label: Option<String>,
    pub description: String,
    pub content: Option<String>,
    pub extension: Option<String>,
    pub global: bool,
}

/// Write a descriptor skeleton into the workspace or per-user directory
pub async fn run_new(ctx: &Context, args: NewTemplateArgs) -> Result<()> {
    validate_name(&args.name)?;

    let origin = if args.global {
        TemplateOrigin::User
    } else {
        TemplateOrigin::Workspace
    };

    let is_family = args.content.is_none();
    let descriptor = Descriptor {
        label: args.label.unwrap_or_else(|| args.name.clone()),
        description: args.description,
        template: args.content,
        extension: args.extension,
    };

    let path = ctx
        .repository
        .create_descriptor(origin, &args.name, &descriptor)
        .await?;

    print_text(&format!(
        "{} Created template '{}' at {}",
        "✓".green().bold(),
        args.name,
        path.display()
    ))?;

    if is_family {
        print_text(&format!("\n{} Next steps:", "→".cyan()))?;
        print_text(&format!(
            "  1. Add files or directories named {0} or {0}.<suffix> next to the descriptor",
            args.name
        ))?;
        print_text("  2. Use __NAME__ in nested names and contents")?;
        print_text(&format!("  3. stencil new {} <name>", args.name))?;
    }

    Ok(())
}

/// Print the descriptor path of a template
pub async fn run_path(ctx: &Context, name: &str) -> Result<()> {
    let definition = ctx.repository.get(name).await?;

    match definition.descriptor_path() {
        Some(path) => print_text(&path.display().to_string())?,
        None => bail!(
            "Template '{}' is {} and has no descriptor on disk",
            name,
            definition.origin().as_str()
        ),
    }

    Ok(())
}
