use crate::common::command::{changeset_stdout, published_repository_dir, run_git_command, work_dir};
use crate::common::file::delete_path;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_deleted_files(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    delete_path(&work.join("a").join("b").join("3.txt"));
    run_git_command(&work, &["rm", "-q", "1.txt"]).assert().success();

    let actual_output = changeset_stdout(&work, &["status"])?;

    assert_eq!(actual_output, "D staged    1.txt\nD unstaged  a/b/3.txt\n");

    Ok(())
}
