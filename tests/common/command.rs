use crate::common::file::{FileSpec, write_file};
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::{Path, PathBuf};

pub const WORK_DIR: &str = "work";
pub const ORIGIN_DIR: &str = "origin.git";

#[fixture]
pub fn repository_dir() -> TempDir {
    TempDir::new().expect("Failed to create temp dir")
}

/// `work/` is a clone-like repository whose `main` has been pushed to the
/// bare `origin.git/` next to it, so `origin/main` matches `HEAD`.
///
/// ```text
/// work/1.txt      one
/// work/a/2.txt    two
/// work/a/b/3.txt  three
/// ```
#[fixture]
pub fn published_repository_dir(repository_dir: TempDir) -> TempDir {
    let root = repository_dir.path();
    let work = root.join(WORK_DIR);

    run_git_command(root, &["init", "-q", "--bare", ORIGIN_DIR])
        .assert()
        .success();
    run_git_command(&root.join(ORIGIN_DIR), &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();

    run_git_command(root, &["init", "-q", WORK_DIR]).assert().success();
    run_git_command(&work, &["symbolic-ref", "HEAD", "refs/heads/main"])
        .assert()
        .success();

    write_file(FileSpec::new(work.join("1.txt"), "one".to_string()));
    write_file(FileSpec::new(work.join("a").join("2.txt"), "two".to_string()));
    write_file(FileSpec::new(work.join("a").join("b").join("3.txt"), "three".to_string()));

    run_git_command(&work, &["add", "."]).assert().success();
    git_commit(&work, "Initial commit").assert().success();

    run_git_command(&work, &["remote", "add", "origin", &format!("../{ORIGIN_DIR}")])
        .assert()
        .success();
    run_git_command(&work, &["push", "-q", "origin", "main"])
        .assert()
        .success();

    repository_dir
}

pub fn work_dir(repository_dir: &TempDir) -> PathBuf {
    repository_dir.path().join(WORK_DIR)
}

pub fn run_changeset_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("changeset").expect("Failed to find changeset binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.env_remove("CHANGESET_TARGET");
    cmd.env_remove("CHANGESET_REMOTE");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn run_git_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::new("git");
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn git_commit(dir: &Path, message: &str) -> Command {
    let mut cmd = run_git_command(
        dir,
        &[
            "-c",
            "user.name=fake_user",
            "-c",
            "user.email=fake_email@email.com",
            "-c",
            "commit.gpgsign=false",
            "commit",
            "-q",
            "-m",
            message,
        ],
    );
    cmd.envs(vec![
        ("GIT_AUTHOR_DATE", "2023-01-01 12:00:00 +0000"),
        ("GIT_COMMITTER_DATE", "2023-01-01 12:00:00 +0000"),
    ]);
    cmd
}

/// Stdout of a successful `changeset` run.
pub fn changeset_stdout(dir: &Path, args: &[&str]) -> Result<String, Box<dyn std::error::Error>> {
    let assert = run_changeset_command(dir, args).assert().success();
    let stdout = assert.get_output().stdout.clone();

    Ok(String::from_utf8(stdout)?)
}
