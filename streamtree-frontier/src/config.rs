//! Tree configuration.

use serde::{Deserialize, Serialize};

/// Default number of nodes to pre-allocate.
pub const DEFAULT_INITIAL_CAPACITY: usize = 64;

/// Default batch size at which proof generation goes parallel.
pub const DEFAULT_PARALLEL_PROOF_THRESHOLD: usize = 16;

/// Configuration for a [`FrontierTree`](crate::FrontierTree).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Nodes to pre-allocate in the arena.
    pub initial_capacity: usize,

    /// Smallest batch handed to rayon by
    /// [`generate_proofs`](crate::FrontierTree::generate_proofs); smaller
    /// batches run sequentially.
    pub parallel_proof_threshold: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            initial_capacity: DEFAULT_INITIAL_CAPACITY,
            parallel_proof_threshold: DEFAULT_PARALLEL_PROOF_THRESHOLD,
        }
    }
}

impl TreeConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size the arena for an expected number of leaves.
    ///
    /// Each leaf costs one node plus at most one insertion-time merge, and
    /// every insertion adds a handful of transient root nodes.
    pub fn for_leaves(leaves: usize) -> Self {
        Self::default().with_capacity(leaves.saturating_mul(3).max(DEFAULT_INITIAL_CAPACITY))
    }

    /// Set the arena pre-allocation.
    pub fn with_capacity(mut self, nodes: usize) -> Self {
        self.initial_capacity = nodes;
        self
    }

    /// Set the parallel proof threshold.
    pub fn with_parallel_proof_threshold(mut self, threshold: usize) -> Self {
        self.parallel_proof_threshold = threshold;
        self
    }
}
