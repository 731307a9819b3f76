//! The streaming merkle tree.
//!
//! The frontier holds at most one complete subtree per power-of-two size
//! class, exactly like the set bits of a binary counter:
//! ```text
//! leaves  frontier          root
//!   1     {1: a}            a
//!   2     {2: ba}           ba
//!   3     {1: c, 2: ba}     H(c, ba)
//!   4     {4: dcba}         dcba
//! ```
//! Inserting a leaf carries it up through every occupied size class, with
//! the incoming subtree on the left and the older frontier entry on the
//! right. The root is then rebuilt from the frontier by pairing entries in
//! ascending size-class order, promoting an odd trailing entry unchanged.
//!
//! This is not the canonical MMR bagging (which folds peaks right to left,
//! largest first). Roots are therefore not interchangeable with other
//! append-only tree implementations.

use std::collections::BTreeMap;

use rayon::prelude::*;
use streamtree_core::{Error, Hash, InclusionProof, Position, ProofNode, Result};
use tracing::{debug, trace};

use crate::config::TreeConfig;
use crate::node::{next_tree_id, Node, NodeArena, NodeId};

/// Append-only merkle tree built incrementally from a frontier of complete
/// subtrees.
///
/// Mutation takes `&mut self` and reads take `&self`, so proof generation can
/// never observe a half-finished insertion.
#[derive(Debug)]
pub struct FrontierTree {
    config: TreeConfig,
    nodes: NodeArena,
    frontier: BTreeMap<u64, NodeId>,
    leaves: Vec<NodeId>,
    root: Option<NodeId>,
}

impl Default for FrontierTree {
    fn default() -> Self {
        Self::new()
    }
}

impl FrontierTree {
    /// Create an empty tree.
    pub fn new() -> Self {
        Self::with_config(TreeConfig::default())
    }

    /// Create an empty tree with the given configuration.
    pub fn with_config(config: TreeConfig) -> Self {
        Self {
            nodes: NodeArena::with_capacity(next_tree_id(), config.initial_capacity),
            config,
            frontier: BTreeMap::new(),
            leaves: Vec::new(),
            root: None,
        }
    }

    /// The configuration this tree was built with.
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Number of leaves inserted so far.
    pub fn leaf_count(&self) -> u64 {
        self.leaves.len() as u64
    }

    /// Number of nodes ever created, including superseded roots.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether no leaf has been inserted yet.
    pub fn is_empty(&self) -> bool {
        self.leaves.is_empty()
    }

    /// Insert a leaf value and return the handle of its node.
    ///
    /// Any byte sequence is accepted, including an empty one.
    pub fn insert(&mut self, value: impl AsRef<[u8]>) -> NodeId {
        let leaf = self.nodes.push_leaf(value.as_ref());
        self.leaves.push(leaf);

        let mut carry = leaf;
        let mut size_class = 1u64;
        while let Some(older) = self.frontier.remove(&size_class) {
            carry = self.nodes.merge(carry, older);
            size_class *= 2;
            debug!(size_class, node = %carry, "merged frontier subtrees");
        }
        self.frontier.insert(size_class, carry);

        self.recompute_root();
        leaf
    }

    /// Insert several leaf values in order.
    pub fn insert_batch<I>(&mut self, values: I) -> Vec<NodeId>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let values = values.into_iter();
        let mut ids = Vec::with_capacity(values.size_hint().0);
        for value in values {
            ids.push(self.insert(value));
        }
        ids
    }

    /// Rebuild the root from the current frontier.
    ///
    /// Entries are paired in ascending size-class order; an odd trailing
    /// entry moves up a level unchanged. Each pairing allocates a new node and
    /// re-points both entries' parent links at it.
    fn recompute_root(&mut self) {
        let mut level: Vec<NodeId> = self.frontier.values().copied().collect();
        if level.is_empty() {
            self.root = None;
            return;
        }

        while level.len() > 1 {
            let mut next = Vec::with_capacity(level.len().div_ceil(2));
            for pair in level.chunks(2) {
                match *pair {
                    [left, right] => {
                        let parent = self.nodes.merge(left, right);
                        trace!(%left, %right, %parent, "paired frontier entries");
                        next.push(parent);
                    }
                    _ => next.extend_from_slice(pair),
                }
            }
            level = next;
        }

        let root = level[0];
        self.root = Some(root);
        debug!(
            leaves = self.leaves.len(),
            root = %root,
            "root updated"
        );
    }

    /// Handle of the current root node.
    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    /// Digest of the whole sequence inserted so far; `None` while empty.
    pub fn current_root_digest(&self) -> Option<Hash> {
        self.root
            .and_then(|id| self.nodes.get(id).ok())
            .map(Node::digest)
    }

    /// Occupied size classes, ascending.
    pub fn size_classes(&self) -> Vec<u64> {
        self.frontier.keys().copied().collect()
    }

    /// Frontier entries as `(size_class, subtree root)`, ascending.
    pub fn frontier(&self) -> impl Iterator<Item = (u64, NodeId)> + '_ {
        self.frontier.iter().map(|(&size, &id)| (size, id))
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Result<&Node> {
        self.nodes.get(id)
    }

    /// Handle of the leaf inserted at `index` (0-based).
    pub fn leaf(&self, index: u64) -> Result<NodeId> {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.leaves.get(i).copied())
            .ok_or_else(|| {
                Error::leaf_not_found(format!(
                    "leaf {} >= leaf count {}",
                    index,
                    self.leaves.len()
                ))
            })
    }

    /// Handles of all leaves, in insertion order.
    pub fn leaves(&self) -> &[NodeId] {
        &self.leaves
    }

    /// Generate an inclusion proof for a node of the current tree.
    ///
    /// Walks parent links from `target` to the root, recording each sibling.
    /// Fails with a not-found error if the tree is empty, the handle is not
    /// from this tree, or the parent chain ends before reaching the root
    /// (the node belongs to a superseded root).
    pub fn generate_proof(&self, target: NodeId) -> Result<InclusionProof> {
        let root = self
            .root
            .ok_or_else(|| Error::not_found(format!("{}: tree is empty", target)))?;
        let leaf = self.nodes.get(target)?.digest();

        let mut path = Vec::new();
        let mut current = target;
        while current != root {
            let parent = self.nodes.get(current)?.parent().ok_or_else(|| {
                Error::not_found(format!("{} is not connected to the current root", target))
            })?;
            path.push(self.sibling(current, parent)?);
            current = parent;
        }

        Ok(InclusionProof {
            leaf,
            path,
            root: self.nodes.get(root)?.digest(),
        })
    }

    /// Generate proofs for several nodes.
    ///
    /// Batches at or above the configured threshold are generated with rayon.
    pub fn generate_proofs(&self, targets: &[NodeId]) -> Result<Vec<InclusionProof>> {
        if targets.len() < self.config.parallel_proof_threshold {
            return targets.iter().map(|&id| self.generate_proof(id)).collect();
        }

        targets
            .par_iter()
            .map(|&id| self.generate_proof(id))
            .collect()
    }

    fn sibling(&self, child: NodeId, parent: NodeId) -> Result<ProofNode> {
        let (left, right) = self.nodes.get(parent)?.children().ok_or_else(|| {
            Error::internal(format!("{} is a parent of {} but has no children", parent, child))
        })?;

        let (sibling, position) = if left == child {
            (right, Position::Right)
        } else if right == child {
            (left, Position::Left)
        } else {
            return Err(Error::internal(format!(
                "{} points at parent {} which does not own it",
                child, parent
            )));
        };

        Ok(ProofNode {
            hash: self.nodes.get(sibling)?.digest(),
            position,
        })
    }
}
