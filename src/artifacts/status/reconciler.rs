use crate::areas::git::ExecutionError;
use crate::artifacts::status::file_change::{FileChange, FileStatus, Provenance};
use crate::artifacts::status::raw_change::RawChangeLine;
use bitflags::bitflags;
use derive_new::new;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, warn};

/// Which pair of trees a name-status diff compares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DiffScope {
    /// Working tree against the index.
    WorkingTree,
    /// Index against `HEAD`.
    Index,
    /// Working tree against a ref.
    Against(String),
    /// One ref against another.
    Between(String, String),
}

/// Read-only queries the reconciler needs from version control.
#[allow(async_fn_in_trait)]
pub trait ChangeSource {
    async fn diff_name_status(
        &self,
        cwd: &Path,
        scope: &DiffScope,
    ) -> Result<Vec<RawChangeLine>, ExecutionError>;

    async fn list_untracked(&self, cwd: &Path) -> Result<Vec<String>, ExecutionError>;
}

bitflags! {
    /// The sources a path was reported by.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Sources: u8 {
        const ORIGIN = 1;
        const UNSTAGED = 1 << 1;
        const STAGED = 1 << 2;
        const UNTRACKED = 1 << 3;
    }
}

impl Sources {
    /// Nearest to the working tree wins.
    pub fn provenance(self) -> Provenance {
        if self.contains(Sources::UNSTAGED) {
            Provenance::Unstaged
        } else if self.contains(Sources::STAGED) {
            Provenance::Staged
        } else if self == Sources::UNTRACKED {
            Provenance::Untracked
        } else {
            Provenance::Unpushed
        }
    }
}

/// The four raw listings a reconciliation pass is computed from.
#[derive(Debug, Clone, Default, new)]
pub struct SourceListings {
    pub origin: Vec<RawChangeLine>,
    pub unstaged: Vec<RawChangeLine>,
    pub staged: Vec<RawChangeLine>,
    pub untracked: Vec<String>,
}

impl SourceListings {
    /// Merge the listings into one change per path.
    ///
    /// Status always comes from the origin diff; the working-tree sources
    /// only decide provenance. Untracked paths are added when the origin
    /// diff does not already cover them.
    pub fn merge(&self) -> Vec<FileChange> {
        let mut seen = BTreeMap::<&str, Sources>::new();
        for raw in &self.unstaged {
            *seen.entry(raw.path.as_str()).or_insert(Sources::empty()) |= Sources::UNSTAGED;
        }
        for raw in &self.staged {
            *seen.entry(raw.path.as_str()).or_insert(Sources::empty()) |= Sources::STAGED;
        }

        let mut changes = BTreeMap::<String, FileChange>::new();

        for raw in &self.origin {
            if changes.contains_key(&raw.path) {
                warn!(path = %raw.path, "path reported twice by the origin diff, keeping the first entry");
                continue;
            }

            let sources = seen.get(raw.path.as_str()).copied().unwrap_or(Sources::empty()) | Sources::ORIGIN;
            let change = FileChange::new(
                raw.path.clone(),
                raw.status(),
                raw.rename_source(),
                sources.provenance(),
            );
            changes.insert(raw.path.clone(), change);
        }

        for path in &self.untracked {
            if let Some(existing) = changes.get(path) {
                warn!(
                    path = %path,
                    status = %existing.status,
                    "untracked path also differs from the comparison target, keeping the diff entry"
                );
                continue;
            }

            let change = FileChange::new(
                path.clone(),
                FileStatus::Added,
                None,
                Sources::UNTRACKED.provenance(),
            );
            changes.insert(path.clone(), change);
        }

        changes.into_values().collect()
    }
}

#[derive(new)]
pub struct ChangeReconciler<'s, S: ChangeSource> {
    source: &'s S,
}

impl<S: ChangeSource> ChangeReconciler<'_, S> {
    /// Collect every change between the working directory and `target`.
    pub async fn reconcile(
        &self,
        cwd: &Path,
        target: &str,
    ) -> Result<Vec<FileChange>, ExecutionError> {
        let listings = self.collect(cwd, target).await?;
        let changes = listings.merge();

        debug!(
            cwd = %cwd.display(),
            target,
            origin = listings.origin.len(),
            unstaged = listings.unstaged.len(),
            staged = listings.staged.len(),
            untracked = listings.untracked.len(),
            reconciled = changes.len(),
            "reconciled change sources"
        );

        Ok(changes)
    }

    /// Files that differ between two refs. Neither side is local, so every
    /// entry counts as unpushed.
    pub async fn compare(
        &self,
        cwd: &Path,
        from: &str,
        to: &str,
    ) -> Result<Vec<FileChange>, ExecutionError> {
        let scope = DiffScope::Between(from.to_string(), to.to_string());
        let origin = self.source.diff_name_status(cwd, &scope).await?;

        Ok(SourceListings::new(origin, Vec::new(), Vec::new(), Vec::new()).merge())
    }

    async fn collect(&self, cwd: &Path, target: &str) -> Result<SourceListings, ExecutionError> {
        let against = DiffScope::Against(target.to_string());

        let (origin, unstaged, staged, untracked) = tokio::try_join!(
            self.source.diff_name_status(cwd, &against),
            self.source.diff_name_status(cwd, &DiffScope::WorkingTree),
            self.source.diff_name_status(cwd, &DiffScope::Index),
            self.source.list_untracked(cwd),
        )?;

        Ok(SourceListings::new(origin, unstaged, staged, untracked))
    }
}
