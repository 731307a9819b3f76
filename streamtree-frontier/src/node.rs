//! Tree nodes and the arena that owns them.
//!
//! Every node a tree ever creates lives in its [`NodeArena`] until the tree
//! is dropped. Children and parents are stored as [`NodeId`]s into that
//! arena, so a parent link never owns the node it points at.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use streamtree_core::{hash, hash_pair, Error, Hash, Result};

static NEXT_TREE_ID: AtomicU64 = AtomicU64::new(0);

/// Allocate an identifier that no other tree in this process shares.
pub(crate) fn next_tree_id() -> u64 {
    NEXT_TREE_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to a node owned by a particular tree.
///
/// Handles are only meaningful for the tree that issued them; any other tree
/// rejects them with a not-found error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId {
    tree: u64,
    index: usize,
}

impl NodeId {
    /// Position of the node in its tree's arena (creation order).
    pub fn index(&self) -> usize {
        self.index
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.index)
    }
}

/// A merkle tree node.
///
/// The digest is fixed at construction. Leaves carry their value and no
/// children; internal nodes carry exactly two children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    digest: Hash,
    leaf_value: Option<Vec<u8>>,
    children: Option<(NodeId, NodeId)>,
    parent: Option<NodeId>,
}

impl Node {
    fn leaf(value: &[u8]) -> Self {
        Self {
            digest: hash(value),
            leaf_value: Some(value.to_vec()),
            children: None,
            parent: None,
        }
    }

    fn internal(left: (NodeId, Hash), right: (NodeId, Hash)) -> Self {
        Self {
            digest: hash_pair(left.1, right.1),
            leaf_value: None,
            children: Some((left.0, right.0)),
            parent: None,
        }
    }

    /// The node's digest.
    pub fn digest(&self) -> Hash {
        self.digest
    }

    /// The value a leaf was built from; `None` for internal nodes.
    pub fn leaf_value(&self) -> Option<&[u8]> {
        self.leaf_value.as_deref()
    }

    /// Whether this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        self.children.is_none()
    }

    /// Left child.
    pub fn left(&self) -> Option<NodeId> {
        self.children.map(|(left, _)| left)
    }

    /// Right child.
    pub fn right(&self) -> Option<NodeId> {
        self.children.map(|(_, right)| right)
    }

    /// Both children, in order.
    pub fn children(&self) -> Option<(NodeId, NodeId)> {
        self.children
    }

    /// The node this one was most recently combined into.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }
}

/// Append-only node storage for a single tree.
#[derive(Debug)]
pub(crate) struct NodeArena {
    tree: u64,
    nodes: Vec<Node>,
}

impl NodeArena {
    pub(crate) fn with_capacity(tree: u64, capacity: usize) -> Self {
        Self {
            tree,
            nodes: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Look up a node, rejecting handles issued by another tree.
    pub(crate) fn get(&self, id: NodeId) -> Result<&Node> {
        if id.tree != self.tree {
            return Err(Error::not_found(format!(
                "{} belongs to a different tree",
                id
            )));
        }
        self.nodes.get(id.index).ok_or_else(|| {
            Error::not_found(format!("{} >= node count {}", id, self.nodes.len()))
        })
    }

    #[cfg(test)]
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.iter()
    }

    pub(crate) fn push_leaf(&mut self, value: &[u8]) -> NodeId {
        self.push(Node::leaf(value))
    }

    /// Combine two existing nodes under a new parent and point both at it.
    ///
    /// Both ids must have been issued by this arena.
    pub(crate) fn merge(&mut self, left: NodeId, right: NodeId) -> NodeId {
        let node = Node::internal(
            (left, self.nodes[left.index].digest),
            (right, self.nodes[right.index].digest),
        );
        let parent = self.push(node);
        self.nodes[left.index].parent = Some(parent);
        self.nodes[right.index].parent = Some(parent);
        parent
    }

    fn push(&mut self, node: Node) -> NodeId {
        let id = NodeId {
            tree: self.tree,
            index: self.nodes.len(),
        };
        self.nodes.push(node);
        id
    }
}
