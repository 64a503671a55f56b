use crate::areas::git::{ExecutionError, GitClient};
use crate::artifacts::branch::ref_name::RevisionName;
use crate::artifacts::status::file_change::FileChange;
use crate::artifacts::status::reconciler::ChangeReconciler;
use crate::artifacts::worktree::WorktreeInfo;
use anyhow::Context;
use std::cell::{RefCell, RefMut};
use std::path::Path;
use tracing::warn;

/// Changes of one worktree. A worktree that could not be reconciled keeps
/// its error so the others can still be shown.
#[derive(Debug)]
pub struct WorktreeChangeSet {
    pub worktree: WorktreeInfo,
    pub changes: Result<Vec<FileChange>, ExecutionError>,
}

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn std::io::Write>>,
    client: GitClient,
    offline: bool,
}

impl Repository {
    /// Open the repository containing `dir`, rooted at its top level.
    pub async fn open(
        dir: &Path,
        client: GitClient,
        offline: bool,
        writer: Box<dyn std::io::Write>,
    ) -> anyhow::Result<Self> {
        let dir = dir
            .canonicalize()
            .with_context(|| format!("working directory {} does not exist", dir.display()))?;
        let path = client
            .toplevel(&dir)
            .await
            .with_context(|| format!("{} is not inside a git repository", dir.display()))?;

        Ok(Repository {
            path: path.into_boxed_path(),
            writer: RefCell::new(writer),
            client,
            offline,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn std::io::Write>> {
        self.writer.borrow_mut()
    }

    pub fn client(&self) -> &GitClient {
        &self.client
    }

    /// The ref local changes are compared against: the explicit one when
    /// given, otherwise `<remote>/<default branch>`, fetched first unless
    /// running offline.
    pub async fn resolve_target(&self, explicit: Option<&str>) -> anyhow::Result<RevisionName> {
        if let Some(target) = explicit {
            return RevisionName::try_parse(target);
        }

        let branch = self.client.detect_default_branch(self.path()).await;
        if !self.offline {
            self.client.fetch_remote(self.path(), &branch).await;
        }

        RevisionName::remote_tracking(self.client.remote(), &branch)
    }

    pub async fn load_changes(&self, cwd: &Path, target: &RevisionName) -> Result<Vec<FileChange>, ExecutionError> {
        ChangeReconciler::new(&self.client)
            .reconcile(cwd, target.as_ref())
            .await
    }

    /// Reconcile every worktree of the repository against the same target.
    pub async fn load_change_sets(&self, target: &RevisionName) -> anyhow::Result<Vec<WorktreeChangeSet>> {
        let worktrees = self
            .client
            .list_worktrees(self.path())
            .await
            .context("failed to list worktrees")?;

        let mut change_sets = Vec::with_capacity(worktrees.len());
        for worktree in worktrees {
            let changes = self.load_changes(worktree.path(), target).await;
            if let Err(e) = &changes {
                warn!(worktree = %worktree.path.display(), error = %e, "failed to load changes");
            }

            change_sets.push(WorktreeChangeSet { worktree, changes });
        }

        Ok(change_sets)
    }
}
