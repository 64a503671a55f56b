//! Pure data and algorithms
//!
//! Nothing in here runs git or touches the file system:
//!
//! - `branch`: Revision validation, branch listings, default-branch parsing
//! - `core`: Shared output utilities (pager wrapper, output format)
//! - `diff`: Which two versions of a file a diff compares
//! - `status`: Parsing and reconciliation of change sources
//! - `tree`: The directory tree built from reconciled changes
//! - `worktree`: Worktree listing parsing

pub mod branch;
pub mod core;
pub mod diff;
pub mod status;
pub mod tree;
pub mod worktree;
