//! New command - materialize a template

use crate::context::Context;
use crate::open::EditorOpener;
use crate::output::{print_json, print_text};
use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use serde_json::json;
use std::env;
use std::path::PathBuf;
use stencil_core::materialize::NoObserver;
use stencil_core::path::{resolve_destination_dir, validate_name};
use stencil_core::{FileReady, MaterializeReport, Materializer, Params};

pub struct NewArgs {
    pub template: String,
    pub name: String,
    pub dest: Option<PathBuf>,
    pub open: bool,
    pub json: bool,
}

/// Create a new instance of a template
///
/// The name is validated before any I/O. Every created, skipped and failed
/// file is reported; any failure makes the command fail after reporting.
pub async fn run(ctx: &Context, args: NewArgs) -> Result<()> {
    validate_name(&args.name)?;
    let params = Params::new(args.name).ok_or_else(|| anyhow!("Name cannot be empty"))?;

    let definition = ctx.repository.get(&args.template).await?;

    let dest = match args.dest {
        Some(dest) => dest,
        None => env::current_dir()?,
    };
    let dest_dir = resolve_destination_dir(&dest).await?;

    if ctx.verbose {
        print_text(&format!(
            "{} Creating '{}' from template '{}' in {}",
            "→".cyan(),
            params.name(),
            definition.name(),
            dest_dir.display()
        ))?;
    }

    let opener;
    let observer: &dyn FileReady = if args.open {
        opener = EditorOpener::from_env();
        &opener
    } else {
        &NoObserver
    };

    let report = Materializer::new(&params)
        .with_observer(observer)
        .instantiate(&definition, &dest_dir)
        .await
        .sorted();

    if args.json {
        output_json(definition.name(), &report)?;
    } else {
        output_human(&report)?;
    }

    if !report.is_success() {
        bail!("{} file(s) could not be created", report.failures().len());
    }

    Ok(())
}

fn output_json(template: &str, report: &MaterializeReport) -> Result<()> {
    let paths = |paths: &[PathBuf]| -> Vec<String> {
        paths.iter().map(|p| p.display().to_string()).collect()
    };

    let failures: Vec<_> = report
        .failures()
        .iter()
        .map(|f| {
            json!({
                "code": f.code(),
                "path": f.path().display().to_string(),
                "message": f.to_string(),
            })
        })
        .collect();

    let output = json!({
        "template": template,
        "created": paths(report.created_files()),
        "skipped": paths(report.skipped_files()),
        "failures": failures,
    });

    print_json(&serde_json::to_string_pretty(&output)?)?;
    Ok(())
}

fn output_human(report: &MaterializeReport) -> Result<()> {
    for path in report.created_files() {
        print_text(&format!("{} Created {}", "✓".green().bold(), path.display()))?;
    }

    for path in report.skipped_files() {
        print_text(&format!(
            "{} Skipped {} (already exists)",
            "→".cyan(),
            path.display()
        ))?;
    }

    for failure in report.failures() {
        eprintln!("{} {}", "✗".red().bold(), failure);
    }

    if report.created_files().is_empty() && report.is_success() {
        print_text(&format!("{} Nothing to create", "!".yellow()))?;
    }

    Ok(())
}
