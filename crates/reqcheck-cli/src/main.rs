//! # reqcheck-cli
//!
//! CLI for checking, listing, editing, and formatting requirement manifests.
//!
//! This is the main entry point for the reqcheck tool. It handles command
//! parsing, sets up logging, and dispatches to the command handlers.

use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use reqcheck_core::error::ReqResult;
use tracing::info;

mod commands;
mod output;

use commands::CommandContext;
use output::errors::ErrorFormatter;

/// Check and edit requirement manifests
#[derive(Parser)]
#[command(name = "reqcheck", version, about = "Requirement manifest checker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Manifest to check directly
    #[arg(value_name = "FILE")]
    pub file: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate one or more manifests
    Check {
        /// Manifests to check (default: ./requirements.txt)
        paths: Vec<Utf8PathBuf>,
        /// Discover requirements*.txt files recursively
        #[arg(short, long)]
        recursive: bool,
        /// Also warn about declarations that are not exact pins
        #[arg(long)]
        strict: bool,
    },
    /// List the declarations of a manifest
    List {
        #[arg(value_name = "FILE", default_value = "requirements.txt")]
        path: Utf8PathBuf,
        /// Print as JSON
        #[arg(long)]
        json: bool,
    },
    /// Add or update a declaration
    Add {
        /// Declaration to add, e.g. 'numpy>=1.16.2'
        spec: String,
        #[arg(long, value_name = "FILE", default_value = "requirements.txt")]
        file: Utf8PathBuf,
    },
    /// Remove a declaration
    Remove {
        package: String,
        #[arg(long, value_name = "FILE", default_value = "requirements.txt")]
        file: Utf8PathBuf,
    },
    /// Rewrite a manifest in canonical form
    Fmt {
        #[arg(value_name = "FILE", default_value = "requirements.txt")]
        path: Utf8PathBuf,
        /// Only check whether the file is canonical
        #[arg(long)]
        check: bool,
    },
    /// Show version information
    Version,
}

fn main() {
    let cli = Cli::parse();

    setup_logging(cli.verbose);

    info!("Starting reqcheck v{}", env!("CARGO_PKG_VERSION"));

    if let Err(error) = run_cli(cli) {
        let formatter = ErrorFormatter::new();
        eprint!("{}", formatter.format_error(&error));
        std::process::exit(1);
    }
}

fn run_cli(cli: Cli) -> ReqResult<()> {
    // Create Tokio runtime for async file operations
    let rt = tokio::runtime::Runtime::new().map_err(|e| {
        reqcheck_core::error::ReqError::io("Failed to create async runtime".to_string(), e)
    })?;

    rt.block_on(async {
        let ctx = CommandContext::new().await?;

        match cli.command {
            Some(command) => commands::dispatch_command(command, &ctx).await,
            None => match cli.file {
                Some(file) => commands::check_bare_argument(file, &ctx).await,
                None => commands::show_help(&ctx).await,
            },
        }
    })
}

fn setup_logging(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "reqcheck_cli={},reqcheck_core={},reqcheck_manifest={}",
            level, level, level
        ))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}
