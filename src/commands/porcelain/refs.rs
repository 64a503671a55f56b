use crate::areas::repository::Repository;
use crate::artifacts::core::OutputFormat;
use colored::Colorize;
use std::io::Write;

impl Repository {
    pub async fn worktrees(&self, format: OutputFormat) -> anyhow::Result<()> {
        let worktrees = self.client().list_worktrees(self.path()).await?;

        if format.is_json() {
            serde_json::to_writer_pretty(&mut *self.writer(), &worktrees)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        for worktree in &worktrees {
            let marker = if worktree.is_main { "*" } else { " " };
            writeln!(
                self.writer(),
                "{} {} [{}]",
                marker,
                worktree.path.display(),
                worktree.branch.as_str().green()
            )?;
        }

        Ok(())
    }

    /// Local branches, then remote-tracking ones under `remotes/`.
    pub async fn branches(&self, format: OutputFormat) -> anyhow::Result<()> {
        let listing = self.client().list_branches(self.path()).await?;

        if format.is_json() {
            serde_json::to_writer_pretty(&mut *self.writer(), &listing)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        for branch in &listing.local {
            writeln!(self.writer(), "  {branch}")?;
        }
        for branch in &listing.remote {
            writeln!(self.writer(), "  {}", format!("remotes/{branch}").as_str().red())?;
        }

        Ok(())
    }

    pub async fn tags(&self, format: OutputFormat) -> anyhow::Result<()> {
        let tags = self.client().list_tags(self.path()).await?;

        if format.is_json() {
            serde_json::to_writer_pretty(&mut *self.writer(), &tags)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        for tag in &tags {
            writeln!(self.writer(), "{tag}")?;
        }

        Ok(())
    }

    /// The remote's default branch as detected, without fetching.
    pub async fn default_branch(&self) -> anyhow::Result<()> {
        let branch = self.client().detect_default_branch(self.path()).await;
        writeln!(self.writer(), "{branch}")?;

        Ok(())
    }
}
