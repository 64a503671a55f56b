use crate::common::command::{changeset_stdout, published_repository_dir, work_dir};
use crate::common::file::{FileSpec, write_file};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn render_tree_as_json(published_repository_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let work = work_dir(&published_repository_dir);

    write_file(FileSpec::new(work.join("a").join("2.txt"), "dos".to_string()));
    write_file(FileSpec::new(work.join("a").join("new.txt"), "nuevo".to_string()));

    let actual_output = changeset_stdout(&work, &["tree", "--format", "json"])?;
    let tree: serde_json::Value = serde_json::from_str(&actual_output)?;

    assert_eq!(tree["name"], "");
    assert_eq!(tree["aggregate_status"], serde_json::Value::Null);

    let dir = &tree["children"][0];
    assert_eq!(dir["kind"], "directory");
    assert_eq!(dir["name"], "a");
    // one added, one modified
    assert_eq!(dir["aggregate_status"], serde_json::Value::Null);

    let names = dir["children"]
        .as_array()
        .map(|children| children.iter().map(|child| child["name"].clone()).collect::<Vec<_>>())
        .unwrap_or_default();
    assert_eq!(names, vec!["2.txt", "new.txt"]);
    assert_eq!(dir["children"][1]["provenance"], "untracked");

    Ok(())
}
