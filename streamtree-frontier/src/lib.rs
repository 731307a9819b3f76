//! Streaming (incremental) merkle tree.
//!
//! A [`FrontierTree`] digests an append-only sequence of values:
//! - O(log n) amortized work per insertion
//! - O(log n) inclusion proofs for any inserted leaf
//! - no rebuild from scratch, ever
//!
//! Complete subtrees are kept in a frontier keyed by their power-of-two size,
//! merged like carries in a binary counter. After every insertion the root is
//! rebuilt from the frontier alone.
//!
//! # Example
//!
//! ```rust
//! use streamtree_frontier::FrontierTree;
//!
//! let mut tree = FrontierTree::new();
//!
//! let first = tree.insert(b"1 transaction");
//! tree.insert(b"2 transaction");
//! tree.insert(b"3 transaction");
//! tree.insert(b"4 transaction");
//!
//! assert_eq!(tree.size_classes(), vec![4]);
//!
//! let proof = tree.generate_proof(first).unwrap();
//! assert_eq!(proof.digests().len(), 3);
//! assert_eq!(proof.root, tree.current_root_digest().unwrap());
//! ```

mod config;
mod node;
mod tree;

#[cfg(test)]
mod proptest;

pub use config::{TreeConfig, DEFAULT_INITIAL_CAPACITY, DEFAULT_PARALLEL_PROOF_THRESHOLD};
pub use node::{Node, NodeId};
pub use tree::FrontierTree;
