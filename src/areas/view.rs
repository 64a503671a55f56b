use crate::areas::git::ExecutionError;
use crate::artifacts::status::file_change::FileChange;
use crate::artifacts::tree::builder::DirectoryTreeBuilder;
use crate::artifacts::tree::node::DirectoryNode;
use std::path::{Path, PathBuf};
use tracing::debug;

/// One installed refresh: the changes and the tree built from them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub generation: u64,
    pub target: String,
    pub changes: Vec<FileChange>,
    pub tree: DirectoryNode,
}

impl Snapshot {
    pub fn new(generation: u64, target: &str, changes: Vec<FileChange>, root_path: &Path) -> Self {
        let tree = DirectoryTreeBuilder::build(&changes, root_path);

        Self {
            generation,
            target: target.to_string(),
            changes,
            tree,
        }
    }
}

/// Handed out when a refresh starts; later tickets compare greater.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Installed,
    /// A newer refresh already completed; the result was dropped.
    Superseded,
}

/// Holds the latest snapshot across overlapping refreshes.
///
/// Refreshes are never cancelled. Each one takes a ticket when it starts,
/// and whichever completes with the newest ticket is what stays displayed.
/// A failed refresh leaves the previous snapshot in place.
#[derive(Debug)]
pub struct ChangeSetView {
    root_path: PathBuf,
    issued: u64,
    current: Option<Snapshot>,
}

impl ChangeSetView {
    pub fn new(root_path: &Path) -> Self {
        Self {
            root_path: root_path.to_path_buf(),
            issued: 0,
            current: None,
        }
    }

    pub fn begin_refresh(&mut self) -> RefreshTicket {
        self.issued += 1;
        RefreshTicket(self.issued)
    }

    pub fn complete_refresh(
        &mut self,
        ticket: RefreshTicket,
        target: &str,
        result: Result<Vec<FileChange>, ExecutionError>,
    ) -> Result<RefreshOutcome, ExecutionError> {
        let changes = result?;

        if self
            .current
            .as_ref()
            .is_some_and(|snapshot| snapshot.generation >= ticket.0)
        {
            debug!(ticket = ticket.0, "dropping result of a superseded refresh");
            return Ok(RefreshOutcome::Superseded);
        }

        self.current = Some(Snapshot::new(ticket.0, target, changes, &self.root_path));
        Ok(RefreshOutcome::Installed)
    }

    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.current.as_ref()
    }
}
