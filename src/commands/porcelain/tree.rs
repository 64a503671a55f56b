use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RevisionName;
use crate::artifacts::core::OutputFormat;
use crate::artifacts::tree::builder::DirectoryTreeBuilder;
use crate::artifacts::tree::node::{DirectoryNode, FileNode, TreeNode};
use crate::commands::porcelain::WorktreeReport;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;

const INDENT: &str = "  ";

impl Repository {
    pub async fn tree(
        &self,
        target: Option<&str>,
        all_worktrees: bool,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        let target = self.resolve_target(target).await?;

        if all_worktrees {
            return self.tree_all_worktrees(&target, format).await;
        }

        let changes = self
            .load_changes(self.path(), &target)
            .await
            .context("failed to load changes")?;
        let tree = DirectoryTreeBuilder::build(&changes, self.path());

        self.write_tree(&tree, format)
    }

    async fn tree_all_worktrees(&self, target: &RevisionName, format: OutputFormat) -> anyhow::Result<()> {
        let change_sets = self.load_change_sets(target).await?;

        if format.is_json() {
            let reports = change_sets
                .iter()
                .map(|set| match &set.changes {
                    Ok(changes) => WorktreeReport::tree(
                        &set.worktree,
                        DirectoryTreeBuilder::build(changes, set.worktree.path()),
                    ),
                    Err(e) => WorktreeReport::failed(&set.worktree, e),
                })
                .collect::<Vec<_>>();

            serde_json::to_writer_pretty(&mut *self.writer(), &reports)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        for set in &change_sets {
            let header = format!("{} ({})", set.worktree.label(), set.worktree.path.display());
            writeln!(self.writer(), "{}", header.as_str().bold())?;

            match &set.changes {
                Ok(changes) => {
                    let tree = DirectoryTreeBuilder::build(changes, set.worktree.path());
                    self.render_directory(&tree, 1)?;
                }
                Err(e) => writeln!(self.writer(), "{INDENT}failed to load changes: {e}")?,
            }
        }

        Ok(())
    }

    pub(crate) fn write_tree(&self, tree: &DirectoryNode, format: OutputFormat) -> anyhow::Result<()> {
        if format.is_json() {
            serde_json::to_writer_pretty(&mut *self.writer(), tree)?;
            writeln!(self.writer())?;
            return Ok(());
        }

        self.render_directory(tree, 0)
    }

    /// Directories first, each name coloured only when everything below it
    /// shares one status.
    pub(crate) fn render_directory(&self, dir: &DirectoryNode, depth: usize) -> anyhow::Result<()> {
        let indent = INDENT.repeat(depth);

        for child in dir.display_children() {
            match child {
                TreeNode::Directory(sub) => {
                    let name = format!("{}/", sub.name);
                    match sub.aggregate_status {
                        Some(status) => writeln!(self.writer(), "{indent}{}", status.paint(&name))?,
                        None => writeln!(self.writer(), "{indent}{name}")?,
                    }
                    self.render_directory(sub, depth + 1)?;
                }
                TreeNode::File(file) => writeln!(self.writer(), "{indent}{}", file_line(file))?,
            }
        }

        Ok(())
    }
}

fn file_line(file: &FileNode) -> String {
    let provenance: &str = (&file.provenance).into();
    let line = format!(
        "{} {} {}",
        file.status.paint(&file.name),
        file.status.paint(&file.status.to_string()),
        provenance.dimmed()
    );

    match &file.old_path {
        Some(old_path) => format!("{line} (from {old_path})"),
        None => line,
    }
}
