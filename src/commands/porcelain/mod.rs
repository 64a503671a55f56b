//! Porcelain commands (user-facing views)
//!
//! ## Commands
//!
//! - `status`: Flat list of reconciled changes
//! - `tree`: The same changes as a directory tree
//! - `compare`: Tree of the files that differ between two refs
//! - `diff`: Patch for one changed file
//! - `watch`: Re-render the tree whenever the repository changes
//! - `refs`: Worktrees, branches, tags and the default branch

pub mod compare;
pub mod diff;
pub mod refs;
pub mod status;
pub mod tree;
pub mod watch;

use crate::areas::git::ExecutionError;
use crate::artifacts::status::file_change::FileChange;
use crate::artifacts::tree::node::DirectoryNode;
use crate::artifacts::worktree::WorktreeInfo;
use serde::Serialize;

/// JSON shape of one worktree when every worktree is reported.
#[derive(Debug, Serialize)]
struct WorktreeReport<'a> {
    worktree: &'a WorktreeInfo,
    #[serde(skip_serializing_if = "Option::is_none")]
    changes: Option<&'a [FileChange]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tree: Option<DirectoryNode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl<'a> WorktreeReport<'a> {
    fn changes(worktree: &'a WorktreeInfo, changes: &'a [FileChange]) -> Self {
        Self {
            worktree,
            changes: Some(changes),
            tree: None,
            error: None,
        }
    }

    fn tree(worktree: &'a WorktreeInfo, tree: DirectoryNode) -> Self {
        Self {
            worktree,
            changes: None,
            tree: Some(tree),
            error: None,
        }
    }

    fn failed(worktree: &'a WorktreeInfo, error: &ExecutionError) -> Self {
        Self {
            worktree,
            changes: None,
            tree: None,
            error: Some(error.to_string()),
        }
    }
}
