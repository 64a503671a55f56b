use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RevisionName;
use crate::artifacts::core::OutputFormat;
use crate::artifacts::status::reconciler::ChangeReconciler;
use crate::artifacts::tree::builder::DirectoryTreeBuilder;
use anyhow::Context;

impl Repository {
    /// Tree of the files that differ between `from` and `to`, or between
    /// `from` and the working tree when `to` is omitted.
    pub async fn compare(&self, from: &str, to: Option<&str>, format: OutputFormat) -> anyhow::Result<()> {
        let from = RevisionName::try_parse(from)?;

        let changes = match to {
            Some(to) => {
                let to = RevisionName::try_parse(to)?;
                ChangeReconciler::new(self.client())
                    .compare(self.path(), from.as_ref(), to.as_ref())
                    .await
                    .with_context(|| format!("failed to compare {from} with {to}"))?
            }
            None => self
                .load_changes(self.path(), &from)
                .await
                .with_context(|| format!("failed to compare {from} with the working tree"))?,
        };

        let tree = DirectoryTreeBuilder::build(&changes, self.path());
        self.write_tree(&tree, format)
    }
}
