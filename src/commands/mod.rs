//! Command implementations
//!
//! Every command is an `impl Repository` block writing to the repository's
//! output writer:
//!
//! - `porcelain`: User-facing views of the change set (status, tree, diff, watch, ...)
//! - `plumbing`: Raw access to repository content (show)

pub mod plumbing;
pub mod porcelain;
