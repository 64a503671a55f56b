use crate::artifacts::status::file_change::{FileChange, FileStatus, Provenance};
use serde::Serialize;

const HEAD_REVISION: &str = "HEAD";
const NULL_PATH: &str = "/dev/null";

/// What to put on each side of the diff opened for a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum DiffPlan {
    /// Nothing on the left: the file only exists in the working tree.
    Created { path: String },
    /// Nothing on the right: the file is shown as it was at `base`.
    Removed { base: String, path: String },
    /// `base:(old_path|path)` against the working-tree `path`.
    Changed {
        base: String,
        old_path: Option<String>,
        path: String,
    },
}

impl DiffPlan {
    /// Pure function of the change's status and provenance.
    pub fn for_change(change: &FileChange, target: &str) -> Self {
        let path = change.path.clone();

        match (change.status, change.provenance) {
            (FileStatus::Added, _) => DiffPlan::Created { path },
            (FileStatus::Deleted, Provenance::Unpushed) => DiffPlan::Removed {
                base: target.to_string(),
                path,
            },
            (FileStatus::Deleted, _) => DiffPlan::Removed {
                base: HEAD_REVISION.to_string(),
                path,
            },
            (FileStatus::Modified | FileStatus::Renamed, _) => DiffPlan::Changed {
                base: target.to_string(),
                old_path: change.old_path.clone(),
                path,
            },
        }
    }

    pub fn path(&self) -> &str {
        match self {
            DiffPlan::Created { path }
            | DiffPlan::Removed { path, .. }
            | DiffPlan::Changed { path, .. } => path,
        }
    }

    pub fn title(&self) -> String {
        match self {
            DiffPlan::Created { path } => format!("{path} (new file)"),
            DiffPlan::Removed { base, path } => format!("{path} ({base}, deleted)"),
            DiffPlan::Changed {
                base,
                old_path: Some(old_path),
                path,
            } => format!("{old_path} -> {path} ({base} ↔ working tree)"),
            DiffPlan::Changed { base, path, .. } => format!("{path} ({base} ↔ working tree)"),
        }
    }

    /// Arguments for the `git diff` invocation that renders this plan.
    pub fn git_args(&self) -> Vec<String> {
        let args: Vec<&str> = match self {
            DiffPlan::Created { path } => vec!["diff", "--no-index", "--", NULL_PATH, path.as_str()],
            DiffPlan::Removed { base, path } => vec!["diff", base.as_str(), "--", path.as_str()],
            DiffPlan::Changed {
                base,
                old_path: Some(old_path),
                path,
            } => vec!["diff", "-M", base.as_str(), "--", old_path.as_str(), path.as_str()],
            DiffPlan::Changed { base, path, .. } => vec!["diff", base.as_str(), "--", path.as_str()],
        };

        args.into_iter().map(str::to_string).collect()
    }

    /// `git diff --no-index` exits with 1 when the sides differ.
    pub fn is_no_index(&self) -> bool {
        matches!(self, DiffPlan::Created { .. })
    }
}
