use crate::areas::repository::Repository;
use crate::artifacts::core::{PagerWriter, should_page};
use crate::artifacts::diff::plan::DiffPlan;
use anyhow::Context;
use minus::Pager;
use std::io::Write;

impl Repository {
    /// Patch of one changed file, chosen from its status and provenance.
    pub async fn diff(&self, path: &str, target: Option<&str>) -> anyhow::Result<()> {
        let path = path.trim_start_matches("./");
        let target = self.resolve_target(target).await?;

        let changes = self
            .load_changes(self.path(), &target)
            .await
            .context("failed to load changes")?;
        let change = changes
            .iter()
            .find(|change| change.path == path || change.old_path.as_deref() == Some(path))
            .with_context(|| format!("{path} has no changes against {target}"))?;

        let plan = DiffPlan::for_change(change, target.as_ref());
        let patch = self
            .client()
            .diff_patch(self.path(), &plan)
            .await
            .with_context(|| format!("failed to diff {}", plan.path()))?;

        if should_page() {
            let pager = Pager::new();
            pager.set_prompt(plan.title())?;

            let mut writer = PagerWriter::new(pager.clone());
            write!(writer, "{patch}")?;
            minus::page_all(pager)?;
        } else {
            writeln!(self.writer(), "{}", plan.title())?;
            write!(self.writer(), "{patch}")?;
        }

        Ok(())
    }
}
