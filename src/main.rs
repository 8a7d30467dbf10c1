//! Scene Renamer CLI
//!
//! A command-line tool for normalizing scene-release TV episode filenames
//! into one canonical form.

use clap::Parser;
use scene_renamer::cli::{
    args::{Cli, Commands},
    commands::{apply, plan},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match cli.command {
        Commands::Plan {
            source,
            output,
            show_name,
            llm,
        } => {
            plan::plan(&source, output.as_deref(), show_name.as_deref(), llm).await?;
        }

        Commands::Apply { plan_file, dry_run } => {
            apply::apply(&plan_file, dry_run).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("scene_renamer=debug")
    } else {
        EnvFilter::new("scene_renamer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}
