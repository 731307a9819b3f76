//! Inclusion proof types.
//!
//! A proof is the ordered list of sibling digests met on the walk from a
//! leaf up to the tree root, followed by the root digest itself.

use serde::{Deserialize, Serialize};

use crate::crypto::Hash;

/// Position of a sibling in a merkle proof.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Position {
    /// Sibling is on the left.
    Left,
    /// Sibling is on the right.
    Right,
}

/// A node in a merkle proof path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProofNode {
    /// Hash of the sibling node.
    pub hash: Hash,
    /// Position of the sibling relative to the path.
    pub position: Position,
}

/// Proof that a node is included under a root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InclusionProof {
    /// Digest of the node the proof starts from.
    pub leaf: Hash,
    /// Siblings from the starting node up to (excluding) the root.
    pub path: Vec<ProofNode>,
    /// Root digest at the time the proof was generated.
    pub root: Hash,
}

impl InclusionProof {
    /// Flatten into the digest sequence: every sibling digest, leaf to root,
    /// then the root digest last.
    pub fn digests(&self) -> Vec<Hash> {
        self.path
            .iter()
            .map(|node| node.hash)
            .chain(std::iter::once(self.root))
            .collect()
    }

    /// Number of digests in [`Self::digests`].
    pub fn len(&self) -> usize {
        self.path.len() + 1
    }

    /// Always false: a proof carries at least the root digest.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Number of merge levels between the starting node and the root.
    pub fn depth(&self) -> usize {
        self.path.len()
    }
}
