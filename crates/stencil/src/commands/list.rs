//! List command - show the merged template set

use crate::context::Context;
use crate::output::{print_json, print_text};
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::path::PathBuf;
use stencil_core::TemplateOrigin;
use stencil_core::template::{DescriptorError, TemplateListing};

/// List every template visible from the workspace
///
/// Invalid descriptors are reported but never stop the listing.
pub async fn run(ctx: &Context, json: bool) -> Result<()> {
    let listing = ctx.repository.list_templates().await?;

    if json {
        output_json(&listing)?;
    } else {
        if ctx.verbose {
            print_sources(ctx)?;
        }
        output_human(&listing, ctx.verbose)?;
    }

    Ok(())
}

/// Print where templates are read from in verbose mode
fn print_sources(ctx: &Context) -> Result<()> {
    print_text(&format!("{} Workspace: {}", "→".cyan(), ctx.workspace_root.display()))?;
    print_text(&format!(
        "  Builtin templates: {}",
        if ctx.config.templates.include_builtin {
            "enabled"
        } else {
            "disabled"
        }
    ))?;
    for origin in [TemplateOrigin::User, TemplateOrigin::Workspace] {
        if let Some(dir) = ctx.repository.dir_for(origin) {
            print_text(&format!("  {} templates: {}", origin.as_str(), dir.display()))?;
        }
    }
    print_text("")?;
    Ok(())
}

#[derive(Serialize)]
struct ListOutput<'a> {
    templates: Vec<TemplateEntry<'a>>,
    count: usize,
    errors: &'a [DescriptorError],
}

#[derive(Serialize)]
struct TemplateEntry<'a> {
    name: &'a str,
    label: &'a str,
    description: &'a str,
    kind: &'static str,
    origin: TemplateOrigin,
    #[serde(skip_serializing_if = "Option::is_none")]
    descriptor: Option<PathBuf>,
}

fn output_json(listing: &TemplateListing) -> Result<()> {
    let templates = listing
        .templates
        .values()
        .map(|t| TemplateEntry {
            name: t.name(),
            label: t.label(),
            description: t.description(),
            kind: t.kind().as_str(),
            origin: t.origin(),
            descriptor: t.descriptor_path(),
        })
        .collect();

    let output = ListOutput {
        templates,
        count: listing.templates.len(),
        errors: &listing.errors,
    };

    print_json(&serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn output_human(listing: &TemplateListing, verbose: bool) -> Result<()> {
    if listing.templates.is_empty() {
        print_text(&format!("{} No templates found", "!".yellow()))?;
        print_text(&format!("\n{} Create one:", "→".cyan()))?;
        print_text("  stencil template new <name> --content '...' --extension .txt")?;
    } else {
        print_text(&format!("{} Templates:", "→".cyan()))?;
        print_text("")?;

        for t in listing.templates.values() {
            print_text(&format!(
                "  {} {} ({}, {})",
                "•".cyan(),
                t.name().bold(),
                t.origin().as_str(),
                t.kind().as_str()
            ))?;
            print_text(&format!("    {}", t.label()))?;
            if !t.description().is_empty() {
                print_text(&format!("    {}", t.description().dimmed()))?;
            }
            if verbose {
                if let Some(path) = t.descriptor_path() {
                    print_text(&format!("    Descriptor: {}", path.display()))?;
                }
            }
        }

        print_text("")?;
        print_text(&format!(
            "{} Total: {} template(s)",
            "→".cyan(),
            listing.templates.len()
        ))?;
    }

    for err in &listing.errors {
        eprintln!("{} {}", "!".yellow(), err);
    }

    Ok(())
}
