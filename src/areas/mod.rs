//! Everything that talks to the outside world
//!
//! - `config`: How git is invoked (binary, remote, timeout)
//! - `git`: The git CLI client and its error type
//! - `repository`: A working directory plus the output the commands write to
//! - `view`: Latest-wins bookkeeping for repeated refreshes
//! - `watcher`: File-system notifications that trigger refreshes

pub mod config;
pub mod git;
pub mod repository;
pub mod view;
pub mod watcher;
