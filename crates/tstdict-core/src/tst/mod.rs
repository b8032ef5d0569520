//! Ternary search tree compilation stages
//!
//! The tree is built, balanced and canonicalized in place inside a single
//! [`NodeArena`]:
//! - **Builder**: plain TST insertion, one node per new character on a path
//! - **Balancer**: weight-median rotations per level
//! - **Canonicalizer**: content hashing plus exact equality turns shared
//!   suffixes into shared nodes (a DAG)

mod balance;
mod builder;
mod dag;
mod hash;
mod node;
mod tree;

pub use balance::{balance, median_rank};
pub use builder::{insert, MAX_FREQUENCY};
pub use dag::{canonicalize, structurally_equal, CanonicalStats, Canonicalizer};
pub use hash::{content_hash, DEFAULT_TABLE_SIZE};
pub use node::{Child, Node, NodeArena, NodeId};
pub use tree::{TernaryTree, TreeStats};
