use crate::common::command::{changeset_stdout, published_repository_dir, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn report_status_as_json(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    write_file(FileSpec::new(work.join("new.txt"), "fresh".to_string()));

    let actual_output = changeset_stdout(&work, &["status", "--format", "json"])?;
    let changes: serde_json::Value = serde_json::from_str(&actual_output)?;

    assert_eq!(
        changes,
        serde_json::json!([
            { "path": "new.txt", "status": "added", "provenance": "untracked" }
        ])
    );

    Ok(())
}
