use crate::artifacts::status::file_change::{FileChange, FileStatus};
use crate::artifacts::tree::node::{DirectoryNode, FileNode, TreeNode};
use std::collections::btree_map::Entry;
use std::path::Path;
use thiserror::Error;
use tracing::warn;

/// Reasons a change cannot be placed in the tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InsertError {
    #[error("path {0:?} has an empty segment")]
    EmptySegment(String),
    #[error("{path:?} collides with an existing entry at {segment:?}")]
    Collision { path: String, segment: String },
}

/// Statuses seen below a directory, folded bottom-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Uniformity {
    Empty,
    Uniform(FileStatus),
    Mixed,
}

impl Uniformity {
    fn merge(self, other: Uniformity) -> Uniformity {
        match (self, other) {
            (Uniformity::Empty, other) | (other, Uniformity::Empty) => other,
            (Uniformity::Uniform(a), Uniformity::Uniform(b)) if a == b => self,
            _ => Uniformity::Mixed,
        }
    }

    fn status(self) -> Option<FileStatus> {
        match self {
            Uniformity::Uniform(status) => Some(status),
            Uniformity::Empty | Uniformity::Mixed => None,
        }
    }
}

/// Builds a directory tree out of a flat list of changes.
///
/// The tree is always rebuilt from scratch; there is no incremental update.
pub struct DirectoryTreeBuilder {
    root: DirectoryNode,
}

impl DirectoryTreeBuilder {
    pub fn new(root_path: &Path) -> Self {
        Self {
            root: DirectoryNode::root(root_path),
        }
    }

    /// Build a tree rooted at `root_path`, skipping (and logging) changes
    /// whose path cannot be placed.
    pub fn build<'c>(changes: impl IntoIterator<Item = &'c FileChange>, root_path: &Path) -> DirectoryNode {
        let mut builder = Self::new(root_path);

        for change in changes {
            if let Err(e) = builder.insert(change) {
                warn!(error = %e, "skipping change that cannot be placed in the tree");
            }
        }

        builder.finish()
    }

    pub fn insert(&mut self, change: &FileChange) -> Result<(), InsertError> {
        let segments = change.path.split('/').collect::<Vec<_>>();
        if segments.iter().any(|segment| segment.is_empty()) {
            return Err(InsertError::EmptySegment(change.path.clone()));
        }

        Self::add_entry(&mut self.root, &segments, change)
    }

    /// Compute aggregate statuses and hand out the finished tree.
    pub fn finish(mut self) -> DirectoryNode {
        for child in self.root.children.values_mut() {
            if let TreeNode::Directory(dir) = child {
                Self::aggregate(dir);
            }
        }

        self.root
    }

    fn add_entry(
        dir: &mut DirectoryNode,
        segments: &[&str],
        change: &FileChange,
    ) -> Result<(), InsertError> {
        let collision = |segment: &str| InsertError::Collision {
            path: change.path.clone(),
            segment: segment.to_string(),
        };

        match *segments {
            [] => Err(InsertError::EmptySegment(change.path.clone())),
            [name] => match dir.children.entry(name.to_string()) {
                Entry::Vacant(slot) => {
                    let full_path = dir.full_path.join(name);
                    slot.insert(TreeNode::File(FileNode::from_change(name, full_path, change)));
                    Ok(())
                }
                Entry::Occupied(_) => Err(collision(name)),
            },
            [parent, ref rest @ ..] => {
                let full_path = dir.full_path.join(parent);
                let child = dir
                    .children
                    .entry(parent.to_string())
                    .or_insert_with(|| TreeNode::Directory(DirectoryNode::new(parent, full_path)));

                match child {
                    TreeNode::Directory(sub) => Self::add_entry(sub, rest, change),
                    TreeNode::File(_) => Err(collision(parent)),
                }
            }
        }
    }

    /// Post-order pass: children are settled before their parent.
    fn aggregate(dir: &mut DirectoryNode) -> Uniformity {
        let uniformity = dir
            .children
            .values_mut()
            .map(|child| match child {
                TreeNode::Directory(sub) => Self::aggregate(sub),
                TreeNode::File(file) => Uniformity::Uniform(file.status),
            })
            .fold(Uniformity::Empty, Uniformity::merge);

        dir.aggregate_status = uniformity.status();
        uniformity
    }
}
