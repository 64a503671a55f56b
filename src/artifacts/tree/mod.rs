//! Hierarchical view of a change set
//!
//! A flat list of `FileChange`s is folded into directories keyed by path
//! segment. Each directory carries an aggregate status that is only set when
//! every file below it shares the same status.
//!
//! - `node`: `TreeNode`, `DirectoryNode` and `FileNode`
//! - `builder`: Insertion and bottom-up status aggregation

pub mod builder;
pub mod node;
