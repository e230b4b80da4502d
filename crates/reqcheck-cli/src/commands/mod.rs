//! Command implementations and dispatch logic.
//!
//! This module contains all command handlers and the central dispatch
//! system. Each command is implemented as an async function that takes a
//! CommandContext.

use reqcheck_core::error::{ReqError, ReqResult};
use std::path::PathBuf;
use tracing::info;

pub mod add;
pub mod check;
pub mod fmt;
pub mod list;
pub mod remove;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};
use camino::Utf8PathBuf;

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    /// Create a new command context
    pub async fn new() -> ReqResult<Self> {
        let cwd = std::env::current_dir()
            .map_err(|e| ReqError::io("Failed to get current directory".to_string(), e))?;

        let output = OutputHandler::new();

        Ok(Self { cwd, output })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> ReqResult<()> {
    match command {
        Commands::Check {
            paths,
            recursive,
            strict,
        } => {
            info!("Checking manifests (recursive: {}, strict: {})", recursive, strict);
            check::execute(paths, recursive, strict, ctx).await
        },
        Commands::List { path, json } => {
            info!("Listing declarations of {} (json: {})", path, json);
            list::execute(path, json, ctx).await
        },
        Commands::Add { spec, file } => {
            info!("Adding declaration '{}' to {}", spec, file);
            add::execute(spec, file, ctx).await
        },
        Commands::Remove { package, file } => {
            info!("Removing '{}' from {}", package, file);
            remove::execute(package, file, ctx).await
        },
        Commands::Fmt { path, check } => {
            info!("Formatting {} (check: {})", path, check);
            fmt::execute(path, check, ctx).await
        },
        Commands::Version => {
            info!("Showing version information");
            show_version(ctx).await
        },
    }
}

/// Handle a bare argument: a manifest path to check, or a command typo
pub async fn check_bare_argument(file: String, ctx: &CommandContext) -> ReqResult<()> {
    // A bare word that is not a file might be a mistyped command
    if !std::path::Path::new(&file).exists() && !file.contains('.') && !file.contains('/') {
        if let Some(suggestion) = suggest_similar_command(&file) {
            ctx.output.error(&format!("Unknown command '{}'", file));
            ctx.output.info(&format!("Did you mean '{}'?", suggestion));
            ctx.output.info("");
            ctx.output.info("Run 'reqcheck help' to see available commands.");
            return Err(ReqError::UnknownCommand { name: file });
        }
    }

    check::execute(vec![Utf8PathBuf::from(file)], false, false, ctx).await
}

/// Show help information
pub async fn show_help(ctx: &CommandContext) -> ReqResult<()> {
    ctx.output.info("reqcheck - requirement manifest checker");
    ctx.output.info("");
    ctx.output.info("Usage: reqcheck [COMMAND] [OPTIONS]");
    ctx.output.info("");
    ctx.output.info("Checking:");
    ctx.output.info("  check [files]  Validate manifests");
    ctx.output.info("  list [file]    List parsed declarations");
    ctx.output.info("  fmt [file]     Rewrite a manifest canonically");
    ctx.output.info("");
    ctx.output.info("Editing:");
    ctx.output.info("  add <spec>     Add or update a declaration");
    ctx.output.info("  remove <pkg>   Remove a declaration");
    ctx.output.info("");
    ctx.output.info("Meta:");
    ctx.output.info("  version        Show version information");
    ctx.output.info("");
    ctx.output
        .info("Run 'reqcheck <command> --help' for more information on a command.");
    Ok(())
}

async fn show_version(ctx: &CommandContext) -> ReqResult<()> {
    let version = env!("CARGO_PKG_VERSION");
    let build_date = env!("BUILD_DATE");
    let target = format!("{}-{}", std::env::consts::ARCH, std::env::consts::OS);

    ctx.output.info(&format!("reqcheck v{}", version));
    ctx.output.info(&format!("Built: {}", build_date));
    ctx.output.info(&format!("Target: {}", target));
    ctx.output.info(&format!("Rust: {}", env!("RUSTC_VERSION")));

    Ok(())
}

/// Suggest similar commands based on edit distance
pub fn suggest_similar_command(input: &str) -> Option<String> {
    let commands = ["check", "list", "add", "remove", "fmt", "version", "help"];

    let mut best_match = None;
    let mut best_distance = usize::MAX;

    for &command in &commands {
        let distance = edit_distance(input, command);
        if distance < best_distance && distance <= 2 {
            best_distance = distance;
            best_match = Some(command);
        }
    }

    best_match.map(|s| s.to_string())
}

/// Calculate edit distance between two strings
fn edit_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();
    let a_len = a_chars.len();
    let b_len = b_chars.len();

    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut matrix = vec![vec![0; b_len + 1]; a_len + 1];

    for (i, row) in matrix.iter_mut().enumerate() {
        row[0] = i;
    }
    for j in 0..=b_len {
        matrix[0][j] = j;
    }

    for i in 1..=a_len {
        for j in 1..=b_len {
            let cost = usize::from(a_chars[i - 1] != b_chars[j - 1]);
            matrix[i][j] = (matrix[i - 1][j] + 1)
                .min(matrix[i][j - 1] + 1)
                .min(matrix[i - 1][j - 1] + cost);
        }
    }

    matrix[a_len][b_len]
}
