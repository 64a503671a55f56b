//! Change-set reconciliation
//!
//! This module turns the raw output of several git queries into one
//! authoritative list of changed files.
//!
//! ## Components
//!
//! - `file_change`: Status and provenance enums plus the `FileChange` record
//! - `raw_change`: Parsing of name-status and path-list output
//! - `reconciler`: Merging of the individual sources with provenance precedence

pub mod file_change;
pub mod raw_change;
pub mod reconciler;

use crate::artifacts::status::file_change::FileStatus;

/// A single status letter followed by an optional similarity score.
pub const NAME_STATUS_CODE_REGEX: &str = r"^[A-Z][0-9]{0,3}$";

pub const STATUS_CODES: phf::Map<&'static str, FileStatus> = phf::phf_map! {
    "A" => FileStatus::Added,
    "D" => FileStatus::Deleted,
    "M" => FileStatus::Modified,
    "R" => FileStatus::Renamed,
};
