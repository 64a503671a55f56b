use crate::common::command::{changeset_stdout, published_repository_dir, run_git_command, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn list_worktrees_with_the_main_one_first(
    published_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["worktree", "add", "-q", "-b", "feature", "../feature"])
        .assert()
        .success();

    let actual_output = changeset_stdout(&work, &["worktrees"])?;
    let lines = actual_output.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("* ") && lines[0].ends_with("work [main]"));
    assert!(lines[1].starts_with("  ") && lines[1].ends_with("feature [feature]"));

    Ok(())
}

#[rstest]
fn report_changes_per_worktree(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);
    let feature = published_repository_dir.path().join("feature");

    run_git_command(&work, &["worktree", "add", "-q", "-b", "feature", "../feature"])
        .assert()
        .success();
    write_file(FileSpec::new(work.join("1.txt"), "uno".to_string()));
    write_file(FileSpec::new(feature.join("feature.txt"), "wip".to_string()));

    let actual_output = changeset_stdout(&work, &["--offline", "status", "--all-worktrees"])?;
    let lines = actual_output.lines().collect::<Vec<_>>();

    assert_eq!(lines.len(), 4);
    assert!(lines[0].starts_with("main ("));
    assert_eq!(lines[1], "  M unstaged  1.txt");
    assert!(lines[2].starts_with("feature ("));
    assert_eq!(lines[3], "  A untracked feature.txt");

    Ok(())
}

#[rstest]
fn report_worktree_trees_as_json(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["worktree", "add", "-q", "-b", "feature", "../feature"])
        .assert()
        .success();

    let actual_output = changeset_stdout(&work, &["tree", "--all-worktrees", "--format", "json"])?;
    let reports: serde_json::Value = serde_json::from_str(&actual_output)?;

    assert_eq!(reports[0]["worktree"]["is_main"], true);
    assert_eq!(reports[1]["worktree"]["branch"], "feature");
    assert_eq!(reports[1]["tree"]["children"], serde_json::json!([]));

    Ok(())
}
