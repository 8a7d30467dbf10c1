//! Command line argument definitions.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Scene Renamer - Normalize scene-release episode filenames
#[derive(Parser, Debug)]
#[command(name = "scene-renamer")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a directory and generate a rename plan
    Plan {
        /// Source directory containing episode files
        #[arg(value_name = "SOURCE")]
        source: PathBuf,

        /// Output path for the plan file
        #[arg(short, long, value_name = "OUTPUT")]
        output: Option<PathBuf>,

        /// Canonical show name (overrides configuration)
        #[arg(long, value_name = "NAME")]
        show_name: Option<String>,

        /// Send unparsed names to the LLM fallback
        #[arg(long)]
        llm: bool,
    },

    /// Apply a previously generated plan
    Apply {
        /// Path to the plan file
        #[arg(value_name = "PLAN_FILE")]
        plan_file: PathBuf,

        /// Dry run - show what would be done
        #[arg(long)]
        dry_run: bool,
    },
}
