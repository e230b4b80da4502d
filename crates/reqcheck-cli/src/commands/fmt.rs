//! `reqcheck fmt` command implementation.
//!
//! Rewrites a manifest in canonical form: declarations as
//! `name<op><version>` with no spaces around the operator, comments and
//! blank lines untouched.

use super::CommandContext;
use camino::Utf8PathBuf;
use reqcheck_core::error::{ReqError, ReqResult};
use reqcheck_manifest::parse_manifest;

/// Execute the `reqcheck fmt` command
pub async fn execute(path: Utf8PathBuf, check_only: bool, ctx: &CommandContext) -> ReqResult<()> {
    let content = tokio::fs::read_to_string(&path)
        .await
        .map_err(|e| ReqError::io(format!("Failed to read {}", path), e))?;

    let manifest = parse_manifest(&content)?;
    let canonical = manifest.to_string();

    if canonical == content {
        ctx.output
            .success(&format!("{} is already canonical", path));
        return Ok(());
    }

    if check_only {
        return Err(ReqError::NotCanonical {
            path: path.to_string(),
        });
    }

    tokio::fs::write(&path, &canonical)
        .await
        .map_err(|e| ReqError::io(format!("Failed to write {}", path), e))?;

    ctx.output.success(&format!("Reformatted {}", path));
    Ok(())
}
