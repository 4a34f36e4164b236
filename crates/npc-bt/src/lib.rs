//! Behavior tree executor.
//!
//! Nodes are ticked against a caller-owned context and return [`BtStatus`]. Composites keep an
//! explicit child cursor, so a `Running` branch resumes on the next tick instead of re-entering
//! from the top.

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod bt;
pub mod nodes;
pub mod tree;

pub use bt::{BtNode, BtStatus};
pub use nodes::{Action, Condition, Parallel, Selector, Sequence};
pub use tree::BehaviorTree;
