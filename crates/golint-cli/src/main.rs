//! golint CLI tool.
//!
//! Usage:
//! ```bash
//! golint check                 # package in the current directory
//! golint check [directories]   # a '/...' suffix includes all sub-directories
//! golint check [files]         # all must belong to a single package
//! golint list-rules
//! golint init
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod config_resolver;
mod discovery;

/// Style linter for Go source code
#[derive(Parser)]
#[command(name = "golint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long, global = true, env = "GOLINT_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Lint Go packages, directories or files
    Check {
        /// Directories (optionally ending in `/...`), files or import paths
        /// (default: current directory)
        paths: Vec<String>,

        /// Minimum confidence of a problem to print it [default: 0.8]
        #[arg(long)]
        min_confidence: Option<f64>,

        /// Exit with status 1 if any problem is found
        #[arg(long)]
        set_exit_status: bool,

        /// Output format
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,
    },

    /// List available rules
    ListRules,

    /// Initialize configuration file
    Init {
        /// Overwrite existing config
        #[arg(long)]
        force: bool,
    },
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `path:line:col: text`, one problem per line.
    #[default]
    Text,
    /// One line per problem with rule, category and confidence.
    Compact,
    /// JSON output.
    Json,
    /// Annotated source snippets.
    Pretty,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            paths,
            min_confidence,
            set_exit_status,
            format,
        } => {
            let source = config_resolver::resolve(
                &discovery::config_root(&paths),
                cli.config.as_deref(),
            );
            let args = commands::check::CheckArgs {
                paths,
                min_confidence,
                set_exit_status,
                format,
            };
            commands::check::run(&args, &source)
        }
        Commands::ListRules => {
            commands::list_rules::run();
            Ok(())
        }
        Commands::Init { force } => commands::init::run(force),
    }
}
