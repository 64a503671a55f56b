//! Branches, tags and the default comparison target
//!
//! - `ref_name`: Validation of revisions passed to git
//! - listing helpers for `git branch` / `git tag` output
//! - resolution of the remote's default branch from `symbolic-ref` output

pub mod ref_name;

use serde::Serialize;

pub const INVALID_REVISION_REGEX: &str = r"^-|\.\.|[\x00-\x20\x7f:]";
pub const FALLBACK_DEFAULT_BRANCH: &str = "main";
pub const LEGACY_DEFAULT_BRANCH: &str = "master";

/// Local and remote-tracking branches, short names only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BranchListing {
    pub local: Vec<String>,
    pub remote: Vec<String>,
}

/// Parse `--format=%(refname:short)` style output, one name per line.
pub fn parse_ref_names(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Remote-tracking names without the symbolic `<remote>/HEAD` entry, which
/// newer git versions abbreviate to the bare remote name.
pub fn parse_remote_branches(output: &str) -> Vec<String> {
    parse_ref_names(output)
        .into_iter()
        .filter(|name| name.contains('/') && !name.ends_with("/HEAD"))
        .collect()
}

/// Extract the branch from `refs/remotes/<remote>/<branch>`.
pub fn parse_symbolic_head(output: &str, remote: &str) -> Option<String> {
    let prefix = format!("refs/remotes/{remote}/");

    output
        .trim()
        .strip_prefix(&prefix)
        .filter(|branch| !branch.is_empty())
        .map(str::to_string)
}
