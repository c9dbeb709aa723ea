//! CLI command structure using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "stencil")]
#[command(version, about = "Create files and directory trees from named templates", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Workspace root (defaults to the nearest ancestor containing .stencil/)
    #[arg(long, global = true, env = "STENCIL_WORKSPACE")]
    pub workspace: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List available templates
    List {
        #[arg(long)]
        json: bool,
    },

    /// Create files from a template
    New {
        /// Template name (see `stencil list`)
        template: String,

        /// Name substituted for __NAME__ in paths and contents
        name: String,

        /// Destination directory, or a file whose directory is used
        #[arg(short, long)]
        dest: Option<PathBuf>,

        /// Open each created file in $VISUAL / $EDITOR
        #[arg(long)]
        open: bool,

        #[arg(long)]
        json: bool,
    },

    /// Template management
    #[command(subcommand)]
    Template(TemplateCommands),
}

#[derive(Subcommand)]
pub enum TemplateCommands {
    /// Create a new template descriptor
    New {
        /// Template name (becomes <name>.template)
        name: String,

        /// Display label (defaults to the name)
        #[arg(long)]
        label: Option<String>,

        #[arg(long, default_value = "")]
        description: String,

        /// Inline content; makes a single-file template
        #[arg(long)]
        content: Option<String>,

        /// Suffix appended to the created file name, e.g. ".rs"
        #[arg(long, requires = "content")]
        extension: Option<String>,

        /// Write to the per-user directory instead of the workspace
        #[arg(long)]
        global: bool,
    },

    /// Print where a template's descriptor lives
    Path {
        name: String,
    },
}
