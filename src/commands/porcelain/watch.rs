use crate::areas::repository::Repository;
use crate::areas::view::{ChangeSetView, RefreshOutcome};
use crate::areas::watcher::ChangeWatcher;
use crate::artifacts::branch::ref_name::RevisionName;
use anyhow::Context;
use colored::Colorize;
use std::io::Write;
use std::time::Duration;
use tracing::{info, warn};

impl Repository {
    /// Render the change tree, then again after every debounced burst of
    /// file-system activity, until the watcher shuts down.
    pub async fn watch(&self, target: Option<&str>, debounce: Duration) -> anyhow::Result<()> {
        let target = self.resolve_target(target).await?;
        let mut view = ChangeSetView::new(self.path());
        let mut watcher = ChangeWatcher::new(self.path(), debounce)
            .with_context(|| format!("failed to watch {}", self.path().display()))?;

        info!(path = %self.path().display(), %target, ?debounce, "watching");

        loop {
            self.refresh(&mut view, &target).await?;

            if watcher.next_burst().await.is_none() {
                break;
            }
        }

        Ok(())
    }

    async fn refresh(&self, view: &mut ChangeSetView, target: &RevisionName) -> anyhow::Result<()> {
        let ticket = view.begin_refresh();
        let result = self.load_changes(self.path(), target).await;

        match view.complete_refresh(ticket, target.as_ref(), result) {
            Ok(RefreshOutcome::Installed) => {
                let Some(snapshot) = view.snapshot() else {
                    return Ok(());
                };

                let branch = self.client().current_branch(self.path()).await;
                let header = format!(
                    "[{}] {branch} against {} ({} changed)",
                    chrono::Local::now().format("%H:%M:%S"),
                    snapshot.target,
                    snapshot.changes.len()
                );
                writeln!(self.writer(), "{}", header.as_str().bold())?;
                self.render_directory(&snapshot.tree, 0)?;
            }
            Ok(RefreshOutcome::Superseded) => {}
            Err(e) => {
                warn!(error = %e, "refresh failed, keeping the previous tree");
                writeln!(self.writer(), "{}", format!("failed to load changes: {e}").as_str().red())?;
            }
        }

        self.writer().flush()?;
        Ok(())
    }
}
