//! Parsing of `git diff --name-status` output
//!
//! Each line is `<code>\t<path>` or, for renames and copies,
//! `<code>\t<old path>\t<new path>`. The code is a single letter,
//! optionally followed by a similarity score (`R100`, `C075`).

use crate::artifacts::status::file_change::FileStatus;
use crate::artifacts::status::{NAME_STATUS_CODE_REGEX, STATUS_CODES};
use std::sync::LazyLock;
use thiserror::Error;
use tracing::warn;

static CODE_REGEX: LazyLock<Result<regex::Regex, regex::Error>> =
    LazyLock::new(|| regex::Regex::new(NAME_STATUS_CODE_REGEX));

/// One line of name-status output, before any reconciliation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawChangeLine {
    pub status_code: String,
    pub path: String,
    pub old_path: Option<String>,
    status: Option<FileStatus>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MalformedLine {
    #[error("missing path field in {0:?}")]
    MissingPath(String),
    #[error("two-path status code without destination in {0:?}")]
    MissingDestination(String),
    #[error("unparseable status code {code:?} in {line:?}")]
    BadCode { code: String, line: String },
    #[error("invalid status code regex: {0}")]
    Pattern(String),
}

impl RawChangeLine {
    pub fn new(status_code: String, path: String, old_path: Option<String>) -> Self {
        let status = status_code
            .get(..1)
            .and_then(|letter| STATUS_CODES.get(letter))
            .copied();

        Self {
            status_code,
            path,
            old_path,
            status,
        }
    }

    pub fn parse(line: &str) -> Result<Self, MalformedLine> {
        let raw = Self::parse_fields(line)?;

        if raw.status.is_none() {
            warn!(code = %raw.status_code, path = %raw.path, "unknown status code, treating as modified");
        }

        Ok(raw)
    }

    fn parse_fields(line: &str) -> Result<Self, MalformedLine> {
        let mut fields = line.split('\t');
        let code = fields.next().unwrap_or_default().trim();

        let code_regex = CODE_REGEX
            .as_ref()
            .map_err(|e| MalformedLine::Pattern(e.to_string()))?;

        if !code_regex.is_match(code) {
            return Err(MalformedLine::BadCode {
                code: code.to_string(),
                line: line.to_string(),
            });
        }

        let first = fields
            .next()
            .filter(|path| !path.is_empty())
            .ok_or_else(|| MalformedLine::MissingPath(line.to_string()))?;

        if Self::is_two_path_code(code) {
            let second = fields
                .next()
                .filter(|path| !path.is_empty())
                .ok_or_else(|| MalformedLine::MissingDestination(line.to_string()))?;

            return Ok(Self::new(
                code.to_string(),
                second.to_string(),
                Some(first.to_string()),
            ));
        }

        Ok(Self::new(code.to_string(), first.to_string(), None))
    }

    /// Map the status code to a [`FileStatus`].
    ///
    /// Anything other than `A`, `D`, `M` and `R` is reported as modified.
    pub fn status(&self) -> FileStatus {
        self.status.unwrap_or(FileStatus::Modified)
    }

    /// `old_path` is only meaningful for renames; copies keep their source to themselves.
    pub fn rename_source(&self) -> Option<String> {
        match self.status() {
            FileStatus::Renamed => self.old_path.clone(),
            _ => None,
        }
    }

    fn is_two_path_code(code: &str) -> bool {
        code.starts_with('R') || code.starts_with('C')
    }
}

/// Parse a whole name-status listing, skipping malformed lines.
pub fn parse_name_status(output: &str) -> Vec<RawChangeLine> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter_map(|line| match RawChangeLine::parse(line) {
            Ok(raw) => Some(raw),
            Err(e) => {
                warn!(error = %e, "skipping malformed name-status line");
                None
            }
        })
        .collect()
}

/// Keep the UTF-8 lines of raw git output, dropping the ones that are not.
///
/// With `core.quotePath=false` git prints path bytes as they are, so one
/// oddly encoded name must not hide the rest of the listing.
pub fn decode_listing(output: &[u8]) -> String {
    output
        .split(|byte| *byte == b'\n')
        .filter_map(|line| match std::str::from_utf8(line) {
            Ok(line) => Some(line),
            Err(e) => {
                warn!(
                    line = %String::from_utf8_lossy(line),
                    error = %e,
                    "skipping listing line that is not valid UTF-8"
                );
                None
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a newline-separated path listing such as `git ls-files` output.
pub fn parse_path_list(output: &str) -> Vec<String> {
    output
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
