//! Diff presentation
//!
//! Decides, from a change's status and provenance alone, which two versions
//! of a file a diff should compare, and how to ask git for that diff.

pub mod plan;
