use crate::areas::config::ClientConfig;
use crate::artifacts::branch::{
    BranchListing, FALLBACK_DEFAULT_BRANCH, LEGACY_DEFAULT_BRANCH, parse_ref_names,
    parse_remote_branches, parse_symbolic_head,
};
use crate::artifacts::diff::plan::DiffPlan;
use crate::artifacts::status::raw_change::{RawChangeLine, decode_listing, parse_name_status, parse_path_list};
use crate::artifacts::status::reconciler::{ChangeSource, DiffScope};
use crate::artifacts::worktree::{WorktreeInfo, parse_worktree_porcelain};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::string::FromUtf8Error;
use std::time::Duration;
use thiserror::Error;
use tokio::process::Command;
use tracing::{debug, info, warn};

const DETACHED_LABEL: &str = "detached";
const UNKNOWN_LABEL: &str = "unknown";

/// An essential git query could not produce a result.
#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("failed to start `{command}`")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },
    #[error("`{command}` failed with exit code {code:?}: {stderr}")]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
    #[error("`{command}` timed out after {after:?}")]
    TimedOut { command: String, after: Duration },
    #[error("`{command}` printed output that is not valid UTF-8")]
    InvalidOutput {
        command: String,
        #[source]
        source: FromUtf8Error,
    },
}

/// Read-only queries against a working directory, answered by the git CLI.
///
/// The only call that touches repository state is [`GitClient::fetch_remote`],
/// which refreshes remote-tracking refs and never fails the caller.
#[derive(Debug, Clone, Default)]
pub struct GitClient {
    config: ClientConfig,
}

impl GitClient {
    pub fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn remote(&self) -> &str {
        &self.config.remote
    }

    /// Root of the working tree containing `cwd`.
    pub async fn toplevel(&self, cwd: &Path) -> Result<PathBuf, ExecutionError> {
        let output = self.run(cwd, &["rev-parse", "--show-toplevel"]).await?;
        Ok(PathBuf::from(output.trim_end_matches('\n')))
    }

    /// Best guess at the remote's default branch, never an error.
    ///
    /// Tries the remote's symbolic HEAD first, then a `master` branch on the
    /// remote, and settles for `main`.
    pub async fn detect_default_branch(&self, cwd: &Path) -> String {
        let remote = self.remote();
        let symbolic_ref = format!("refs/remotes/{remote}/HEAD");

        match self.run(cwd, &["symbolic-ref", symbolic_ref.as_str()]).await {
            Ok(output) => {
                if let Some(branch) = parse_symbolic_head(&output, remote) {
                    debug!(branch, "default branch from remote HEAD");
                    return branch;
                }
            }
            Err(e) => debug!(error = %e, "remote HEAD is not set"),
        }

        let legacy = format!("{remote}/{LEGACY_DEFAULT_BRANCH}");
        if self
            .run(cwd, &["rev-parse", "--verify", "--quiet", legacy.as_str()])
            .await
            .is_ok()
        {
            return LEGACY_DEFAULT_BRANCH.to_string();
        }

        FALLBACK_DEFAULT_BRANCH.to_string()
    }

    /// Refresh `<remote>/<branch>`. Failures leave the local view stale.
    pub async fn fetch_remote(&self, cwd: &Path, branch: &str) {
        match self.run(cwd, &["fetch", self.remote(), branch]).await {
            Ok(_) => info!(remote = self.remote(), branch, "fetched"),
            Err(e) => warn!(
                remote = self.remote(),
                branch,
                error = %e,
                "fetch failed, comparing against the last fetched state"
            ),
        }
    }

    pub async fn list_worktrees(&self, cwd: &Path) -> Result<Vec<WorktreeInfo>, ExecutionError> {
        let output = self.run(cwd, &["worktree", "list", "--porcelain"]).await?;
        Ok(parse_worktree_porcelain(&output))
    }

    pub async fn diff_name_status(
        &self,
        cwd: &Path,
        scope: &DiffScope,
    ) -> Result<Vec<RawChangeLine>, ExecutionError> {
        let mut args = vec!["diff", "--name-status", "-M", "--no-color"];
        match scope {
            DiffScope::WorkingTree => {}
            DiffScope::Index => args.push("--cached"),
            DiffScope::Against(target) => args.push(target.as_str()),
            DiffScope::Between(from, to) => args.extend([from.as_str(), to.as_str()]),
        }
        args.push("--");

        let output = self.run_raw(cwd, &args, &[0]).await?;
        Ok(parse_name_status(&decode_listing(&output)))
    }

    /// Untracked files that are not ignored.
    pub async fn list_untracked(&self, cwd: &Path) -> Result<Vec<String>, ExecutionError> {
        let output = self
            .run_raw(cwd, &["ls-files", "--others", "--exclude-standard"], &[0])
            .await?;
        Ok(parse_path_list(&decode_listing(&output)))
    }

    pub async fn list_branches(&self, cwd: &Path) -> Result<BranchListing, ExecutionError> {
        let format = "--format=%(refname:short)";
        let local_args = ["branch", format];
        let remote_args = ["branch", "-r", format];
        let (local, remote) = tokio::try_join!(self.run(cwd, &local_args), self.run(cwd, &remote_args))?;

        Ok(BranchListing {
            local: parse_ref_names(&local),
            remote: parse_remote_branches(&remote),
        })
    }

    pub async fn list_tags(&self, cwd: &Path) -> Result<Vec<String>, ExecutionError> {
        let output = self.run(cwd, &["tag", "--list"]).await?;
        Ok(parse_ref_names(&output))
    }

    /// Checked-out branch, `detached` for a detached HEAD, `unknown` when git
    /// cannot tell.
    pub async fn current_branch(&self, cwd: &Path) -> String {
        match self.run(cwd, &["rev-parse", "--abbrev-ref", "HEAD"]).await {
            Ok(output) => match output.trim() {
                "HEAD" => DETACHED_LABEL.to_string(),
                branch => branch.to_string(),
            },
            Err(e) => {
                debug!(error = %e, "current branch unavailable");
                UNKNOWN_LABEL.to_string()
            }
        }
    }

    pub async fn file_exists_in_ref(&self, cwd: &Path, revision: &str, path: &str) -> bool {
        let object = format!("{revision}:{path}");
        self.run(cwd, &["cat-file", "-e", object.as_str()]).await.is_ok()
    }

    pub async fn show_file(&self, cwd: &Path, revision: &str, path: &str) -> Result<String, ExecutionError> {
        let object = format!("{revision}:{path}");
        self.run(cwd, &["show", object.as_str()]).await
    }

    /// Full textual patch for a diff plan.
    pub async fn diff_patch(&self, cwd: &Path, plan: &DiffPlan) -> Result<String, ExecutionError> {
        let args = plan.git_args();
        let args = args.iter().map(String::as_str).collect::<Vec<_>>();

        // `--no-index` exits with 1 whenever the two sides differ
        let accepted: &[i32] = if plan.is_no_index() { &[0, 1] } else { &[0] };
        self.run_accepting(cwd, &args, accepted).await
    }

    async fn run(&self, cwd: &Path, args: &[&str]) -> Result<String, ExecutionError> {
        self.run_accepting(cwd, args, &[0]).await
    }

    async fn run_accepting(
        &self,
        cwd: &Path,
        args: &[&str],
        accepted: &[i32],
    ) -> Result<String, ExecutionError> {
        let output = self.run_raw(cwd, args, accepted).await?;
        String::from_utf8(output).map_err(|source| ExecutionError::InvalidOutput {
            command: format!("git {}", args.join(" ")),
            source,
        })
    }

    /// Stdout bytes of a git invocation that exited with one of `accepted`.
    async fn run_raw(&self, cwd: &Path, args: &[&str], accepted: &[i32]) -> Result<Vec<u8>, ExecutionError> {
        let command = format!("git {}", args.join(" "));
        debug!(command, cwd = %cwd.display(), "running");

        let mut process = Command::new(&self.config.git_binary);
        process
            .current_dir(cwd)
            .args(["-c", "core.quotePath=false"])
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match self.config.timeout {
            Some(after) => tokio::time::timeout(after, process.output())
                .await
                .map_err(|_| ExecutionError::TimedOut {
                    command: command.clone(),
                    after,
                })?,
            None => process.output().await,
        };
        let output = output.map_err(|source| ExecutionError::Spawn {
            command: command.clone(),
            source,
        })?;

        let code = output.status.code();
        if !code.is_some_and(|code| accepted.contains(&code)) {
            return Err(ExecutionError::Failed {
                command,
                code,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        Ok(output.stdout)
    }
}

impl ChangeSource for GitClient {
    async fn diff_name_status(
        &self,
        cwd: &Path,
        scope: &DiffScope,
    ) -> Result<Vec<RawChangeLine>, ExecutionError> {
        GitClient::diff_name_status(self, cwd, scope).await
    }

    async fn list_untracked(&self, cwd: &Path) -> Result<Vec<String>, ExecutionError> {
        GitClient::list_untracked(self, cwd).await
    }
}
