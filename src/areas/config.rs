use derive_new::new;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_GIT_BINARY: &str = "git";
pub const DEFAULT_REMOTE: &str = "origin";

/// How the client reaches git and which remote it compares against.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ClientConfig {
    pub git_binary: PathBuf,
    pub remote: String,
    /// Upper bound for a single git invocation; `None` waits forever.
    pub timeout: Option<Duration>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(PathBuf::from(DEFAULT_GIT_BINARY), DEFAULT_REMOTE.to_string(), None)
    }
}
