use crate::artifacts::branch::INVALID_REVISION_REGEX;
use anyhow::Context;
use serde::Serialize;

/// A revision handed to git as a positional argument (`origin/main`,
/// `v1.2.0`, `HEAD~3`).
///
/// Anything that git could mistake for an option or a range is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RevisionName(String);

impl RevisionName {
    pub fn try_parse(name: &str) -> anyhow::Result<Self> {
        if name.is_empty() {
            anyhow::bail!("revision cannot be empty");
        }

        let re = regex::Regex::new(INVALID_REVISION_REGEX)
            .with_context(|| format!("invalid revision regex: {INVALID_REVISION_REGEX}"))?;

        if re.is_match(name) {
            anyhow::bail!("invalid revision: {}", name);
        } else {
            Ok(Self(name.to_string()))
        }
    }

    /// `<remote>/<branch>`, the remote-tracking ref for a branch.
    pub fn remote_tracking(remote: &str, branch: &str) -> anyhow::Result<Self> {
        Self::try_parse(&format!("{remote}/{branch}"))
    }
}

impl AsRef<str> for RevisionName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RevisionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
