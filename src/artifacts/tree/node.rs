use crate::artifacts::status::file_change::{FileChange, FileStatus, Provenance};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// A node of the change tree: either a directory or a changed file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum TreeNode {
    Directory(DirectoryNode),
    File(FileNode),
}

impl TreeNode {
    pub fn name(&self) -> &str {
        match self {
            TreeNode::Directory(dir) => &dir.name,
            TreeNode::File(file) => &file.name,
        }
    }

    pub fn full_path(&self) -> &Path {
        match self {
            TreeNode::Directory(dir) => &dir.full_path,
            TreeNode::File(file) => &file.full_path,
        }
    }

    /// File status, or the aggregate status of a directory.
    pub fn status(&self) -> Option<FileStatus> {
        match self {
            TreeNode::Directory(dir) => dir.aggregate_status,
            TreeNode::File(file) => Some(file.status),
        }
    }

    pub fn is_directory(&self) -> bool {
        matches!(self, TreeNode::Directory(_))
    }
}

/// Leaf node, one per reconciled change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileNode {
    pub name: String,
    /// Repo-relative path of the change.
    pub path: String,
    pub full_path: PathBuf,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    pub provenance: Provenance,
}

impl FileNode {
    pub fn from_change(name: &str, full_path: PathBuf, change: &FileChange) -> Self {
        Self {
            name: name.to_string(),
            path: change.path.clone(),
            full_path,
            status: change.status,
            old_path: change.old_path.clone(),
            provenance: change.provenance,
        }
    }

    pub fn to_change(&self) -> FileChange {
        FileChange::new(
            self.path.clone(),
            self.status,
            self.old_path.clone(),
            self.provenance,
        )
    }
}

/// Directory node. Children are keyed by path segment, so a segment can
/// never appear twice under the same parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DirectoryNode {
    pub name: String,
    pub full_path: PathBuf,
    #[serde(serialize_with = "serialize_children")]
    pub children: BTreeMap<String, TreeNode>,
    /// Set iff every descendant file shares this status.
    pub aggregate_status: Option<FileStatus>,
}

impl DirectoryNode {
    pub fn new(name: &str, full_path: PathBuf) -> Self {
        Self {
            name: name.to_string(),
            full_path,
            children: BTreeMap::new(),
            aggregate_status: None,
        }
    }

    pub fn root(root_path: &Path) -> Self {
        Self::new("", root_path.to_path_buf())
    }

    /// Children in display order: directories first, then files, each group
    /// by ordinal name.
    pub fn display_children(&self) -> impl Iterator<Item = &TreeNode> {
        let dirs = self.children.values().filter(|node| node.is_directory());
        let files = self.children.values().filter(|node| !node.is_directory());
        dirs.chain(files)
    }

    /// Walk down from this directory following a `/`-separated relative path.
    pub fn find(&self, path: &str) -> Option<&TreeNode> {
        let (first, rest) = match path.split_once('/') {
            Some((first, rest)) => (first, Some(rest)),
            None => (path, None),
        };

        let child = self.children.get(first)?;
        match (child, rest) {
            (_, None) => Some(child),
            (TreeNode::Directory(dir), Some(rest)) => dir.find(rest),
            (TreeNode::File(_), Some(_)) => None,
        }
    }

    /// Every file below this directory, depth-first in display order.
    pub fn files(&self) -> Vec<&FileNode> {
        let mut files = Vec::new();
        self.collect_files(&mut files);
        files
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    fn collect_files<'n>(&'n self, files: &mut Vec<&'n FileNode>) {
        for child in self.display_children() {
            match child {
                TreeNode::Directory(dir) => dir.collect_files(files),
                TreeNode::File(file) => files.push(file),
            }
        }
    }
}

fn serialize_children<S>(children: &BTreeMap<String, TreeNode>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let dirs = children.values().filter(|node| node.is_directory());
    let files = children.values().filter(|node| !node.is_directory());
    serializer.collect_seq(dirs.chain(files))
}
