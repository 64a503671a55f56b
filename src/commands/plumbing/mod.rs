//! Plumbing commands (raw repository content)
//!
//! ## Commands
//!
//! - `show`: Print a file as it exists at a revision

pub mod show;
