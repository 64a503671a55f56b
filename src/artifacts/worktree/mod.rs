//! Worktrees attached to a repository
//!
//! Parsed from `git worktree list --porcelain`, which prints one block of
//! `<key> <value>` lines per worktree, separated by blank lines:
//!
//! ```text
//! worktree /src/project
//! HEAD 3f1c0e8d...
//! branch refs/heads/main
//!
//! worktree /src/project-hotfix
//! HEAD 91ab77c2...
//! detached
//! ```
//!
//! The first block always describes the main worktree.

use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::warn;

const SHORT_OID_LENGTH: usize = 7;
const BRANCH_REF_PREFIX: &str = "refs/heads/";
const BARE_LABEL: &str = "(bare)";
const UNKNOWN_LABEL: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorktreeInfo {
    pub path: PathBuf,
    /// Branch name, abbreviated HEAD when detached, `(bare)` for bare entries.
    pub branch: String,
    pub is_main: bool,
}

impl WorktreeInfo {
    /// Main worktrees are named after their branch, linked ones after their directory.
    pub fn label(&self) -> String {
        if self.is_main {
            return self.branch.clone();
        }

        self.path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "worktree".to_string())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[derive(Debug, Default)]
struct PendingWorktree {
    path: Option<PathBuf>,
    head: Option<String>,
    branch: Option<String>,
    bare: bool,
}

impl PendingWorktree {
    fn finish(self, is_main: bool) -> Option<WorktreeInfo> {
        let path = self.path?;
        let branch = match (self.branch, self.head, self.bare) {
            (Some(branch), _, _) => branch,
            (None, _, true) => BARE_LABEL.to_string(),
            (None, Some(head), false) => head.chars().take(SHORT_OID_LENGTH).collect(),
            (None, None, false) => UNKNOWN_LABEL.to_string(),
        };

        Some(WorktreeInfo {
            path,
            branch,
            is_main,
        })
    }
}

pub fn parse_worktree_porcelain(output: &str) -> Vec<WorktreeInfo> {
    let mut worktrees = Vec::new();
    let mut pending = PendingWorktree::default();

    for line in output.lines() {
        let (key, value) = line.split_once(' ').unwrap_or((line, ""));

        match key {
            "worktree" => {
                let finished = std::mem::take(&mut pending).finish(worktrees.is_empty());
                worktrees.extend(finished);
                pending.path = Some(PathBuf::from(value));
            }
            "HEAD" => pending.head = Some(value.to_string()),
            "branch" => {
                let branch = value.strip_prefix(BRANCH_REF_PREFIX).unwrap_or(value);
                pending.branch = Some(branch.to_string());
            }
            "bare" => pending.bare = true,
            "detached" | "locked" | "prunable" | "" => {}
            other => warn!(key = other, "ignoring unknown worktree attribute"),
        }
    }

    let finished = pending.finish(worktrees.is_empty());
    worktrees.extend(finished);

    worktrees
}
