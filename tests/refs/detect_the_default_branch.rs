use crate::common::command::{changeset_stdout, git_commit, published_repository_dir, run_git_command, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn fall_back_to_main(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    let actual_output = changeset_stdout(&work, &["default-branch"])?;

    assert_eq!(actual_output, "main\n");

    Ok(())
}

#[rstest]
fn prefer_a_remote_master_branch(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["push", "-q", "origin", "main:master"])
        .assert()
        .success();

    let actual_output = changeset_stdout(&work, &["default-branch"])?;

    assert_eq!(actual_output, "master\n");

    Ok(())
}

#[rstest]
fn follow_the_remote_head(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["push", "-q", "origin", "main:release/2.x"])
        .assert()
        .success();
    run_git_command(&work, &["remote", "set-head", "origin", "release/2.x"])
        .assert()
        .success();

    let actual_output = changeset_stdout(&work, &["default-branch"])?;

    assert_eq!(actual_output, "release/2.x\n");

    Ok(())
}

#[rstest]
fn detected_branch_is_the_default_target(
    published_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["push", "-q", "origin", "main:release/2.x"])
        .assert()
        .success();
    run_git_command(&work, &["remote", "set-head", "origin", "release/2.x"])
        .assert()
        .success();
    write_file(FileSpec::new(work.join("1.txt"), "uno".to_string()));
    run_git_command(&work, &["add", "."]).assert().success();
    git_commit(&work, "Shipped to main only").assert().success();
    run_git_command(&work, &["push", "-q", "origin", "main"])
        .assert()
        .success();

    let actual_output = changeset_stdout(&work, &["status"])?;

    assert_eq!(actual_output, "M unpushed  1.txt\n");

    Ok(())
}
