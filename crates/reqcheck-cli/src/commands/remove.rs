//! `reqcheck remove` command implementation.
//!
//! Removes every declaration of a package from a manifest.

use super::CommandContext;
use camino::Utf8PathBuf;
use reqcheck_core::error::{ReqError, ReqResult};
use reqcheck_manifest::{load_from_file, save_to_file};

/// Execute the `reqcheck remove` command
pub async fn execute(package: String, file: Utf8PathBuf, ctx: &CommandContext) -> ReqResult<()> {
    let mut manifest = load_from_file(&file).await?;

    let removed = manifest.remove(&package);
    if removed == 0 {
        return Err(ReqError::DeclarationNotFound { name: package });
    }

    save_to_file(&file, &manifest).await?;

    ctx.output.success(&format!(
        "Removed {} declaration(s) of '{}' from {}",
        removed, package, file
    ));

    Ok(())
}
