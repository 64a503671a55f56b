use colored::{ColoredString, Colorize};
use derive_new::new;
use serde::Serialize;

const PROVENANCE_WIDTH: usize = 9;

/// What happened to a file relative to the comparison target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Deleted,
    Modified,
    Renamed,
}

impl FileStatus {
    pub fn paint(&self, text: &str) -> ColoredString {
        match self {
            FileStatus::Added => text.green(),
            FileStatus::Deleted => text.red(),
            FileStatus::Modified => text.yellow(),
            FileStatus::Renamed => text.cyan(),
        }
    }
}

impl From<&FileStatus> for &str {
    fn from(status: &FileStatus) -> Self {
        match status {
            FileStatus::Added => "A",
            FileStatus::Deleted => "D",
            FileStatus::Modified => "M",
            FileStatus::Renamed => "R",
        }
    }
}

impl std::fmt::Display for FileStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status_str: &str = self.into();
        write!(f, "{}", status_str)
    }
}

/// Where a change currently lives relative to the comparison target.
///
/// Variants are declared from the working tree outwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Untracked,
    Unstaged,
    Staged,
    Unpushed,
}

impl From<&Provenance> for &str {
    fn from(provenance: &Provenance) -> Self {
        match provenance {
            Provenance::Untracked => "untracked",
            Provenance::Unstaged => "unstaged",
            Provenance::Staged => "staged",
            Provenance::Unpushed => "unpushed",
        }
    }
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let provenance_str: &str = self.into();
        write!(f, "{:<width$}", provenance_str, width = PROVENANCE_WIDTH)
    }
}

/// One reconciled file. `path` is repo-relative and `/`-separated.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, new)]
pub struct FileChange {
    pub path: String,
    pub status: FileStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub old_path: Option<String>,
    pub provenance: Provenance,
}

impl FileChange {
    pub fn display_path(&self) -> String {
        match &self.old_path {
            Some(old_path) => format!("{} -> {}", old_path, self.path),
            None => self.path.clone(),
        }
    }
}

impl std::fmt::Display for FileChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {}",
            self.status.paint(&self.status.to_string()),
            self.provenance,
            self.display_path()
        )
    }
}
