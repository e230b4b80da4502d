//! `reqcheck add` command implementation.
//!
//! Adds a declaration to a manifest, or updates the constraint of an
//! existing one.

use super::CommandContext;
use camino::Utf8PathBuf;
use reqcheck_core::error::ReqResult;
use reqcheck_manifest::parse::parse_declaration;
use reqcheck_manifest::{load_from_file, save_to_file, Manifest};

/// Execute the `reqcheck add` command
pub async fn execute(spec: String, file: Utf8PathBuf, ctx: &CommandContext) -> ReqResult<()> {
    let declaration = parse_declaration(spec.trim(), 0)?;

    // A missing manifest is not an error for add: start a fresh one
    let mut manifest = if file.exists() {
        load_from_file(&file).await?
    } else {
        Manifest::new()
    };

    let replaced = manifest.upsert(declaration.clone());
    save_to_file(&file, &manifest).await?;

    if replaced {
        ctx.output
            .success(&format!("Updated {} in {}", declaration, file));
    } else {
        ctx.output
            .success(&format!("Added {} to {}", declaration, file));
    }

    Ok(())
}
