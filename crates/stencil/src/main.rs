mod cli;
mod commands;
mod context;
mod logging;
mod open;
mod output;

use clap::Parser;
use cli::{Cli, Commands, TemplateCommands};
use context::Context;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = run(cli).await;

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::new(cli.workspace, cli.verbose)?;

    match cli.command {
        Commands::List { json } => commands::list::run(&ctx, json).await,
        Commands::New {
            template,
            name,
            dest,
            open,
            json,
        } => {
            commands::new::run(
                &ctx,
                commands::new::NewArgs {
                    template,
                    name,
                    dest,
                    open,
                    json,
                },
            )
            .await
        }
        Commands::Template(template_cmd) => match template_cmd {
            TemplateCommands::New {
                name,
                label,
                description,
                content,
                extension,
                global,
            } => {
                commands::template::run_new(
                    &ctx,
                    commands::template::NewTemplateArgs {
                        name,
                        label,
                        description,
                        content,
                        extension,
                        global,
                    },
                )
                .await
            }
            TemplateCommands::Path { name } => commands::template::run_path(&ctx, &name).await,
        },
    }
}
