use crate::common::command::{changeset_stdout, published_repository_dir, run_changeset_command, run_git_command, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn show_patch_for_a_modified_file(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    write_file(FileSpec::new(work.join("a").join("2.txt"), "dos\n".to_string()));

    let actual_output = changeset_stdout(&work, &["diff", "a/2.txt"])?;

    assert!(actual_output.starts_with("a/2.txt (origin/main ↔ working tree)\n"));
    assert!(actual_output.contains("-two"));
    assert!(actual_output.contains("+dos"));

    Ok(())
}

#[rstest]
fn show_patch_for_an_untracked_file(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    write_file(FileSpec::new(work.join("new.txt"), "hello\n".to_string()));

    let actual_output = changeset_stdout(&work, &["diff", "new.txt"])?;

    assert!(actual_output.starts_with("new.txt (new file)\n"));
    assert!(actual_output.contains("+hello"));

    Ok(())
}

#[rstest]
fn show_patch_for_a_staged_deletion(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    run_git_command(&work, &["rm", "-q", "1.txt"]).assert().success();

    let actual_output = changeset_stdout(&work, &["diff", "1.txt"])?;

    assert!(actual_output.starts_with("1.txt (HEAD, deleted)\n"));
    assert!(actual_output.contains("-one"));

    Ok(())
}

#[rstest]
fn refuse_to_diff_an_unchanged_file(published_repository_dir: TempDir) {
    let work = work_dir(&published_repository_dir);

    run_changeset_command(&work, &["diff", "1.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("1.txt has no changes against origin/main"));
}
