use crate::areas::repository::Repository;
use crate::artifacts::branch::ref_name::RevisionName;
use std::io::Write;

impl Repository {
    pub async fn show(&self, revision: &str, path: &str) -> anyhow::Result<()> {
        let revision = RevisionName::try_parse(revision)?;
        let path = path.trim_start_matches("./");

        if !self
            .client()
            .file_exists_in_ref(self.path(), revision.as_ref(), path)
            .await
        {
            anyhow::bail!("{path} does not exist in {revision}");
        }

        let content = self
            .client()
            .show_file(self.path(), revision.as_ref(), path)
            .await?;
        write!(self.writer(), "{content}")?;

        Ok(())
    }
}
