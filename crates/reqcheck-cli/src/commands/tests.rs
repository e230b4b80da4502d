//! Unit tests for CLI commands.

use super::*;
use camino::Utf8PathBuf;
use reqcheck_core::error::ReqError;
use std::fs;
use tempfile::TempDir;

/// Create a temporary directory for testing
fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test command context
async fn create_test_context(temp_dir: &TempDir) -> CommandContext {
    CommandContext {
        cwd: temp_dir.path().to_path_buf(),
        output: crate::output::OutputHandler::new(),
    }
}

/// Write a manifest into the temp directory and return its path
fn write_manifest(temp_dir: &TempDir, content: &str) -> Utf8PathBuf {
    let path = temp_dir.path().join("requirements.txt");
    fs::write(&path, content).expect("Failed to write manifest");
    Utf8PathBuf::from_path_buf(path).expect("Temp path is not UTF-8")
}

#[tokio::test]
async fn test_suggest_similar_command() {
    // Exact matches
    assert_eq!(suggest_similar_command("check"), Some("check".to_string()));

    // Typos
    assert_eq!(suggest_similar_command("chek"), Some("check".to_string()));
    assert_eq!(suggest_similar_command("lst"), Some("list".to_string()));
    assert_eq!(suggest_similar_command("remve"), Some("remove".to_string()));
    assert_eq!(suggest_similar_command("fm"), Some("fmt".to_string()));

    // No suggestion for very different strings
    assert_eq!(suggest_similar_command("xyzzy"), None);
    assert_eq!(suggest_similar_command("completely-different"), None);
}

#[tokio::test]
async fn test_edit_distance() {
    assert_eq!(edit_distance("", ""), 0);
    assert_eq!(edit_distance("", "abc"), 3);
    assert_eq!(edit_distance("abc", ""), 3);
    assert_eq!(edit_distance("abc", "abc"), 0);
    assert_eq!(edit_distance("abc", "ab"), 1);
    assert_eq!(edit_distance("abc", "abcd"), 1);
    assert_eq!(edit_distance("check", "chek"), 1);
    assert_eq!(edit_distance("remove", "remve"), 1);
}

#[tokio::test]
async fn test_check_clean_manifest() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = write_manifest(&temp_dir, "tensorflow==1.14.0\nnumpy>=1.16.2\nnetworkx\n");

    let result = check::execute(vec![path], false, false, &ctx).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_check_conflicting_manifest() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = write_manifest(&temp_dir, "tensorflow==1.14.0\ntensorflow>=2.0\n");

    let result = check::execute(vec![path], false, false, &ctx).await;
    assert!(matches!(
        result,
        Err(ReqError::ChecksFailed { errors: 1, .. })
    ));
}

#[tokio::test]
async fn test_check_malformed_manifest() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = write_manifest(&temp_dir, "numpy>=1.0,<2.0\n");

    let result = check::execute(vec![path], false, false, &ctx).await;
    assert!(matches!(result, Err(ReqError::ChecksFailed { .. })));
}

#[tokio::test]
async fn test_check_recursive_discovers_nested_manifests() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;

    fs::write(temp_dir.path().join("requirements.txt"), "numpy>=1.16.2\n").unwrap();
    let nested = temp_dir.path().join("docs");
    fs::create_dir(&nested).unwrap();
    fs::write(nested.join("requirements-dev.txt"), "networkx\n").unwrap();

    let result = check::execute(Vec::new(), true, false, &ctx).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_check_recursive_reports_nested_conflict() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;

    fs::write(temp_dir.path().join("requirements.txt"), "numpy>=1.16.2\n").unwrap();
    let nested = temp_dir.path().join("docs");
    fs::create_dir(&nested).unwrap();
    fs::write(
        nested.join("requirements-dev.txt"),
        "tensorflow==1.14.0\ntensorflow>=2.0\n",
    )
    .unwrap();

    // the conflict lives only in the nested file, so failing proves
    // recursive discovery found it
    let result = check::execute(Vec::new(), true, false, &ctx).await;
    assert!(matches!(
        result,
        Err(ReqError::ChecksFailed { errors: 1, files: 2 })
    ));
}

#[tokio::test]
async fn test_add_creates_and_updates() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("requirements.txt"))
        .expect("Temp path is not UTF-8");

    add::execute("numpy>=1.16.2".to_string(), path.clone(), &ctx)
        .await
        .unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "numpy>=1.16.2\n"
    );

    add::execute("numpy==1.18.0".to_string(), path.clone(), &ctx)
        .await
        .unwrap();
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "numpy==1.18.0\n"
    );
}

#[tokio::test]
async fn test_add_rejects_bad_spec() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("requirements.txt"))
        .expect("Temp path is not UTF-8");

    let result = add::execute("-bad-name==1.0".to_string(), path, &ctx).await;
    assert!(matches!(result, Err(ReqError::InvalidName { .. })));
}

#[tokio::test]
async fn test_remove() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = write_manifest(&temp_dir, "# stack\nnumpy>=1.16.2\nnetworkx\n");

    remove::execute("numpy".to_string(), path.clone(), &ctx)
        .await
        .unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "# stack\nnetworkx\n");

    let result = remove::execute("numpy".to_string(), path, &ctx).await;
    assert!(matches!(result, Err(ReqError::DeclarationNotFound { .. })));
}

#[tokio::test]
async fn test_fmt_rewrites_canonically() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = write_manifest(&temp_dir, "numpy >= 1.16.2\n");

    fmt::execute(path.clone(), false, &ctx).await.unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "numpy>=1.16.2\n");
}

#[tokio::test]
async fn test_fmt_check_mode() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = write_manifest(&temp_dir, "numpy >= 1.16.2\n");

    let result = fmt::execute(path.clone(), true, &ctx).await;
    assert!(matches!(result, Err(ReqError::NotCanonical { .. })));

    // --check must not modify the file
    assert_eq!(fs::read_to_string(&path).unwrap(), "numpy >= 1.16.2\n");

    // A canonical file passes
    fs::write(&path, "numpy>=1.16.2\n").unwrap();
    assert!(fmt::execute(path, true, &ctx).await.is_ok());
}

#[tokio::test]
async fn test_list_missing_file() {
    let temp_dir = create_temp_dir();
    let ctx = create_test_context(&temp_dir).await;
    let path = Utf8PathBuf::from_path_buf(temp_dir.path().join("missing.txt"))
        .expect("Temp path is not UTF-8");

    let result = list::execute(path, false, &ctx).await;
    assert!(matches!(result, Err(ReqError::Io { .. })));
}
