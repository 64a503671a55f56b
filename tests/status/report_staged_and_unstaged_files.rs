use crate::common::command::{changeset_stdout, published_repository_dir, run_git_command, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_staged_and_unstaged_files(
    published_repository_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    write_file(FileSpec::new(work.join("a").join("2.txt"), "dos".to_string()));
    run_git_command(&work, &["add", "a/2.txt"]).assert().success();
    write_file(FileSpec::new(work.join("a").join("b").join("3.txt"), "tres".to_string()));

    let actual_output = changeset_stdout(&work, &["status"])?;

    assert_eq!(actual_output, "M staged    a/2.txt\nM unstaged  a/b/3.txt\n");

    Ok(())
}
