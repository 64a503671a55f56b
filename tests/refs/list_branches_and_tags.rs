use crate::common::command::{changeset_stdout, published_repository_dir, run_git_command, work_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_local_and_remote_branches(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["branch", "feature/tree-view"])
        .assert()
        .success();
    run_git_command(&work, &["fetch", "-q", "origin"]).assert().success();

    let actual_output = changeset_stdout(&work, &["branches"])?;

    assert_eq!(actual_output, "  feature/tree-view\n  main\n  remotes/origin/main\n");

    Ok(())
}

#[rstest]
fn list_branches_as_json(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["fetch", "-q", "origin"]).assert().success();

    let actual_output = changeset_stdout(&work, &["branches", "--format", "json"])?;
    let listing: serde_json::Value = serde_json::from_str(&actual_output)?;

    assert_eq!(
        listing,
        serde_json::json!({ "local": ["main"], "remote": ["origin/main"] })
    );

    Ok(())
}

#[rstest]
fn list_tags(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["tag", "v1.0"]).assert().success();
    run_git_command(&work, &["tag", "v0.9"]).assert().success();

    let actual_output = changeset_stdout(&work, &["tags"])?;

    assert_eq!(actual_output, "v0.9\nv1.0\n");

    Ok(())
}
