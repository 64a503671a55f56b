//! Change sets of a git working tree relative to a remote comparison target,
//! reconciled from several git queries and arranged as a directory tree.
//!
//! - `areas`: The git client, configuration and refresh orchestration
//! - `artifacts`: Parsing, reconciliation and tree building
//! - `commands`: The CLI commands, as `impl Repository` blocks

pub mod areas;
pub mod artifacts;
pub mod commands;
