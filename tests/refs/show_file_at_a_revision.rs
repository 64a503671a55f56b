use crate::common::command::{changeset_stdout, published_repository_dir, run_changeset_command, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_file_at_a_revision(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    write_file(FileSpec::new(work.join("a").join("2.txt"), "dos".to_string()));

    let actual_output = changeset_stdout(&work, &["show", "origin/main", "a/2.txt"])?;

    assert_eq!(actual_output, "two");

    Ok(())
}

#[rstest]
fn fail_for_a_file_missing_at_the_revision(published_repository_dir: TempDir) {
    let work = work_dir(&published_repository_dir);

    run_changeset_command(&work, &["show", "HEAD", "nope.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt does not exist in HEAD"));
}
