use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RevisionName;
use crate::artifacts::core::OutputFormat;
use crate::artifacts::status::file_change::FileChange;
use crate::commands::porcelain::WorktreeReport;
use anyhow::Context;
use std::io::Write;

impl Repository {
    pub async fn status(
        &self,
        target: Option<&str>,
        all_worktrees: bool,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        let target = self.resolve_target(target).await?;

        if all_worktrees {
            return self.status_all_worktrees(&target, format).await;
        }

        let changes = self
            .load_changes(self.path(), &target)
            .await
            .context("failed to load changes")?;

        if format.is_json() {
            serde_json::to_writer_pretty(&mut *self.writer(), &changes)?;
            writeln!(self.writer())?;
        } else {
            self.write_changes(&changes, "")?;
        }

        Ok(())
    }

    async fn status_all_worktrees(&self, target: &RevisionName, format: OutputFormat) -> anyhow::Result<()> {
        let change_sets = self.load_change_sets(target).await?;

        if format.is_json() {
            let reports = change_sets
                .iter()
                .map(|set| match &set.changes {
                    Ok(changes) => WorktreeReport::changes(&set.worktree, changes),
                    Err(e) => WorktreeReport::failed(&set.worktree, e),
                })
                .collect::<Vec<_>>();

            serde_json::to_writer_pretty(&mut *self.writer(), &reports)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        for set in &change_sets {
            writeln!(
                self.writer(),
                "{} ({})",
                set.worktree.label(),
                set.worktree.path.display()
            )?;
            match &set.changes {
                Ok(changes) => self.write_changes(changes, "  ")?,
                Err(e) => writeln!(self.writer(), "  failed to load changes: {e}")?,
            }
        }

        Ok(())
    }

    /// One line per change: status letter, provenance, path.
    fn write_changes(&self, changes: &[FileChange], indent: &str) -> anyhow::Result<()> {
        for change in changes {
            writeln!(self.writer(), "{indent}{change}")?;
        }

        Ok(())
    }
}
