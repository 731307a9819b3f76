//! Property-based tests for the frontier tree.
//!
//! Tests invariants of the tree under arbitrary insertion sequences.

use proptest::prelude::*;

use crate::FrontierTree;
use streamtree_core::{hash, hash_pair, Hash, InclusionProof, Position};

// ============================================================================
// Strategies
// ============================================================================

/// Generate an arbitrary leaf value, empty values included.
fn arb_value() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..64)
}

/// Generate a sequence of leaf values.
fn arb_values(max_count: usize) -> impl Strategy<Value = Vec<Vec<u8>>> {
    prop::collection::vec(arb_value(), 0..max_count)
}

fn build(values: &[Vec<u8>]) -> FrontierTree {
    let mut tree = FrontierTree::new();
    tree.insert_batch(values);
    tree
}

fn fold(proof: &InclusionProof) -> Hash {
    proof.path.iter().fold(proof.leaf, |acc, node| match node.position {
        Position::Left => hash_pair(node.hash, acc),
        Position::Right => hash_pair(acc, node.hash),
    })
}

// ============================================================================
// Property Tests: Insertion
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Inserting n values yields n leaves
    #[test]
    fn prop_tree_leaf_count(values in arb_values(100)) {
        let tree = build(&values);
        prop_assert_eq!(tree.leaf_count(), values.len() as u64);
    }

    /// Occupied size classes are the set bits of the leaf count
    #[test]
    fn prop_tree_frontier_is_binary_counter(n in 0u64..300u64) {
        let mut tree = FrontierTree::new();
        for i in 0..n {
            tree.insert(i.to_le_bytes());
            let count = i + 1;
            let expected: Vec<u64> = (0..64)
                .map(|bit| 1u64 << bit)
                .filter(|class| count & class != 0)
                .collect();
            prop_assert_eq!(tree.size_classes(), expected);
        }
    }

    /// Size classes sum to the leaf count
    #[test]
    fn prop_tree_size_classes_sum(values in arb_values(100)) {
        let tree = build(&values);
        let sum: u64 = tree.size_classes().iter().sum();
        prop_assert_eq!(sum, tree.leaf_count());
    }

    /// Root is deterministic for the same sequence of inserts
    #[test]
    fn prop_tree_root_deterministic(values in arb_values(50)) {
        prop_assert_eq!(
            build(&values).current_root_digest(),
            build(&values).current_root_digest()
        );
    }

    /// Root changes after each insertion
    #[test]
    fn prop_tree_root_changes(values in arb_values(40)) {
        let mut tree = FrontierTree::new();
        let mut prev = tree.current_root_digest();

        for value in &values {
            tree.insert(value);
            let next = tree.current_root_digest();
            prop_assert!(next.is_some());
            prop_assert_ne!(prev, next);
            prev = next;
        }
    }

    /// A single leaf's digest is the root
    #[test]
    fn prop_tree_single_leaf_root(value in arb_value()) {
        let mut tree = FrontierTree::new();
        tree.insert(&value);
        prop_assert_eq!(tree.current_root_digest(), Some(hash(&value)));
    }

    /// Order matters for the root
    #[test]
    fn prop_tree_order_matters(values in prop::collection::vec(arb_value(), 2..10)) {
        let reversed: Vec<Vec<u8>> = values.iter().rev().cloned().collect();
        prop_assume!(values != reversed);

        prop_assert_ne!(
            build(&values).current_root_digest(),
            build(&reversed).current_root_digest()
        );
    }
}

// ============================================================================
// Property Tests: Inclusion Proofs
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Every inserted leaf has a proof that folds to the current root
    #[test]
    fn prop_tree_all_leaves_provable(values in arb_values(64)) {
        prop_assume!(!values.is_empty());

        let tree = build(&values);
        let root = tree.current_root_digest().expect("non-empty tree has a root");

        for (i, &leaf) in tree.leaves().iter().enumerate() {
            let proof = tree.generate_proof(leaf).expect("proof should succeed");
            prop_assert_eq!(proof.leaf, hash(&values[i]));
            prop_assert_eq!(proof.digests().last().copied(), Some(root));
            prop_assert_eq!(fold(&proof), root);
        }
    }

    /// Old leaves stay provable against each new root
    #[test]
    fn prop_tree_proofs_follow_growth(values in arb_values(40)) {
        let mut tree = FrontierTree::new();

        for value in &values {
            tree.insert(value);
            let root = tree.current_root_digest().expect("root after insert");
            for &leaf in tree.leaves() {
                let proof = tree.generate_proof(leaf).expect("proof should succeed");
                prop_assert_eq!(fold(&proof), root);
            }
        }
    }

    /// Proof length is bounded by tree height plus pairing levels
    #[test]
    fn prop_tree_proof_size_logarithmic(n in 1u64..1000u64) {
        let mut tree = FrontierTree::new();
        for i in 0..n {
            tree.insert(format!("leaf{}", i));
        }

        let bits = 64 - n.leading_zeros() as usize;
        for index in [0, n / 2, n - 1] {
            let proof = tree
                .generate_proof(tree.leaf(index).expect("leaf exists"))
                .expect("proof should succeed");
            prop_assert!(proof.depth() <= 2 * bits);
        }
    }

    /// Tampering with a sibling breaks the fold
    #[test]
    fn prop_tree_tampered_sibling_detected(n in 2u64..40u64, victim in any::<prop::sample::Index>()) {
        let mut tree = FrontierTree::new();
        for i in 0..n {
            tree.insert(format!("leaf{}", i));
        }

        let leaf = tree.leaf(victim.index(n as usize) as u64).expect("leaf exists");
        let mut proof = tree.generate_proof(leaf).expect("proof should succeed");
        proof.path[0].hash = hash(b"tampered");

        prop_assert_ne!(fold(&proof), proof.root);
    }
}

// ============================================================================
// Property Tests: Error Cases
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    /// Leaf lookup past the end fails
    #[test]
    fn prop_tree_leaf_out_of_bounds(n in 0u64..50u64, extra in 0u64..10u64) {
        let mut tree = FrontierTree::new();
        for i in 0..n {
            tree.insert(i.to_be_bytes());
        }
        prop_assert!(tree.leaf(n + extra).is_err());
    }

    /// A root replaced by a later insertion is no longer provable
    #[test]
    fn prop_tree_superseded_root_unprovable(n in 3u64..100u64) {
        // Only multi-peak roots are transient nodes.
        prop_assume!(n.count_ones() > 1);

        let mut tree = FrontierTree::new();
        for i in 0..n {
            tree.insert(i.to_be_bytes());
        }
        let stale = tree.root().expect("root exists");
        tree.insert(b"next");

        let err = tree.generate_proof(stale).expect_err("stale root must be rejected");
        prop_assert!(err.is_not_found());
    }
}
