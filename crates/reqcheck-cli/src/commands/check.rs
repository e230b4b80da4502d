//! `reqcheck check` command implementation.
//!
//! Validates one or more manifests and reports findings with file and
//! line locations.

use super::CommandContext;
use crate::output::errors::ErrorFormatter;
use camino::Utf8PathBuf;
use reqcheck_core::error::{ReqError, ReqResult};
use reqcheck_manifest::{load_from_file, validate, Severity, ValidateOptions};
use tracing::debug;
use walkdir::WalkDir;

/// Execute the `reqcheck check` command
pub async fn execute(
    paths: Vec<Utf8PathBuf>,
    recursive: bool,
    strict: bool,
    ctx: &CommandContext,
) -> ReqResult<()> {
    let targets = if recursive {
        discover_manifests(ctx)?
    } else if paths.is_empty() {
        vec![Utf8PathBuf::from("requirements.txt")]
    } else {
        paths
    };

    if targets.is_empty() {
        ctx.output.warn("No requirements*.txt files found");
        return Ok(());
    }

    let formatter = ErrorFormatter::new();
    let options = ValidateOptions {
        require_pins: strict,
    };

    let mut error_count = 0;
    let mut warning_count = 0;

    for path in &targets {
        ctx.output.step("🔍", &format!("Checking {}", path));

        let manifest = match load_from_file(path).await {
            Ok(manifest) => manifest,
            Err(error) => {
                error_count += 1;
                eprint!("{}", formatter.format_error(&error));
                if let Some(line) = error_line(&error) {
                    eprintln!("{}", formatter.format_location(path.as_str(), line));
                }
                continue;
            },
        };

        let findings = validate(&manifest, &options);
        for finding in &findings {
            match finding.severity {
                Severity::Error => {
                    error_count += 1;
                    eprintln!("{}", formatter.format_simple(&finding.message));
                },
                Severity::Warning => {
                    warning_count += 1;
                    eprintln!("{}", formatter.format_warning(&finding.message));
                },
            }
            eprintln!("{}", formatter.format_location(path.as_str(), finding.line));
        }

        debug!(path = %path, findings = findings.len(), "checked manifest");
    }

    if error_count == 0 {
        if warning_count == 0 {
            ctx.output
                .success(&format!("{} manifest(s) are well-formed", targets.len()));
        } else {
            ctx.output.warn(&format!(
                "{} manifest(s) checked, {} warning(s)",
                targets.len(),
                warning_count
            ));
        }
        Ok(())
    } else {
        Err(ReqError::ChecksFailed {
            errors: error_count,
            files: targets.len(),
        })
    }
}

/// Find requirements*.txt files under the current directory
fn discover_manifests(ctx: &CommandContext) -> ReqResult<Vec<Utf8PathBuf>> {
    let mut manifests = Vec::new();

    for entry in WalkDir::new(&ctx.cwd).follow_links(false) {
        let entry = entry.map_err(|e| ReqError::Io {
            message: "Failed to walk directory tree".to_string(),
            source: e.into(),
        })?;

        if !entry.file_type().is_file() {
            continue;
        }

        let name = entry.file_name().to_string_lossy();
        if name.starts_with("requirements") && name.ends_with(".txt") {
            if let Some(path) = entry.path().to_str() {
                manifests.push(Utf8PathBuf::from(path));
            }
        }
    }

    manifests.sort();
    Ok(manifests)
}

/// Line number carried by a parse error, if any
fn error_line(error: &ReqError) -> Option<usize> {
    match error {
        ReqError::InvalidName { line, .. }
        | ReqError::InvalidVersion { line, .. }
        | ReqError::UnknownOperator { line, .. }
        | ReqError::MultipleConstraints { line, .. }
        | ReqError::UnsupportedSyntax { line, .. } => Some(*line),
        _ => None,
    }
}
