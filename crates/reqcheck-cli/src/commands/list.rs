//! `reqcheck list` command implementation.
//!
//! Prints the declarations of a manifest as a table or as JSON.

use super::CommandContext;
use camino::Utf8PathBuf;
use reqcheck_core::error::ReqResult;
use reqcheck_manifest::{load_from_file, Manifest};
use serde_json::json;

/// Execute the `reqcheck list` command
pub async fn execute(path: Utf8PathBuf, as_json: bool, ctx: &CommandContext) -> ReqResult<()> {
    let manifest = load_from_file(&path).await?;

    if as_json {
        let entries = json_entries(&manifest);
        println!("{}", serde_json::to_string_pretty(&entries).unwrap_or_default());
        return Ok(());
    }

    if manifest.is_empty() {
        ctx.output.warn(&format!("{} declares no packages", path));
        return Ok(());
    }

    for declaration in manifest.declarations() {
        match &declaration.constraint {
            Some(constraint) => println!(
                "{:<30} {:>2} {}",
                declaration.name,
                constraint.op.symbol(),
                constraint.version
            ),
            None => println!("{}", declaration.name),
        }
    }

    ctx.output
        .info(&format!("{} declaration(s) in {}", manifest.len(), path));

    Ok(())
}

/// Build the JSON view of a manifest: one (name, operator, version, line)
/// entry per declaration, in file order
fn json_entries(manifest: &Manifest) -> Vec<serde_json::Value> {
    manifest
        .declarations()
        .map(|declaration| {
            json!({
                "name": declaration.name,
                "operator": declaration
                    .constraint
                    .as_ref()
                    .map(|c| c.op.symbol()),
                "version": declaration
                    .constraint
                    .as_ref()
                    .map(|c| c.version.to_string()),
                "line": declaration.line,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqcheck_manifest::parse_manifest;
    use serde_json::Value;

    #[test]
    fn test_json_entries_for_reference_manifest() {
        let manifest = parse_manifest("tensorflow==1.14.0\nnumpy>=1.16.2\nnetworkx\n").unwrap();
        let entries = json_entries(&manifest);

        assert_eq!(entries.len(), 3);

        assert_eq!(entries[0]["name"], "tensorflow");
        assert_eq!(entries[0]["operator"], "==");
        assert_eq!(entries[0]["version"], "1.14.0");
        assert_eq!(entries[0]["line"], 1);

        assert_eq!(entries[1]["name"], "numpy");
        assert_eq!(entries[1]["operator"], ">=");
        assert_eq!(entries[1]["version"], "1.16.2");

        assert_eq!(entries[2]["name"], "networkx");
        assert_eq!(entries[2]["operator"], Value::Null);
        assert_eq!(entries[2]["version"], Value::Null);
    }
}
